use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    Family,
    Friend,
    Work,
    Other,
}

impl Category {
    pub const ALL: &'static [Category] = &[
        Category::Family,
        Category::Friend,
        Category::Work,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Family => "Family",
            Self::Friend => "Friend",
            Self::Work => "Work",
            Self::Other => "Other",
        }
    }

    /// Strict, case-insensitive lookup by label
    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "family" => Some(Self::Family),
            "friend" => Some(Self::Friend),
            "work" => Some(Self::Work),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Parse stored category text. Anything outside the fixed set reads as `Other`.
    pub fn parse(s: &str) -> Self {
        Self::from_label(s).unwrap_or(Self::Other)
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }

    /// Next entry in combo order, wrapping around
    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    /// Previous entry in combo order, wrapping around
    pub fn prev(self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.position() + len - 1) % len]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row of the `contacts` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub category: Category,
}

/// Values written by insert and update. The id is assigned by SQLite.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactFields {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub category: Category,
}

impl ContactFields {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// The only validation rule: a contact needs a name.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.name.is_empty() {
            return Err(FormError::NameRequired);
        }
        Ok(())
    }
}

/// User-facing validation failures. `Display` is the warning dialog text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Name is required.")]
    NameRequired,
    #[error("Select a contact to delete.")]
    NothingToDelete,
}

/// Map an empty form value to `None`
pub fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
