//! Window controller: list, search filter, details form and the
//! add / update / delete actions, independent of how they are drawn.

use anyhow::Result;

use crate::cli::form::ContactForm;
use crate::db::Database;
use crate::models::FormError;

/// Modal dialogs the controller needs from its front end
pub trait Dialogs {
    /// Blocking warning with a single acknowledgement
    fn warning(&mut self, title: &str, message: &str) -> Result<()>;

    /// Yes/no question. Returns true on yes.
    fn confirm(&mut self, title: &str, question: &str) -> Result<bool>;
}

/// Case-insensitive substring match used by the search field
pub fn matches_search(name: &str, search_text: &str) -> bool {
    name.to_lowercase().contains(&search_text.to_lowercase())
}

/// One loaded name in the contact list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub name: String,
    pub hidden: bool,
}

pub struct ContactWindow<'a> {
    db: &'a Database,
    entries: Vec<ListEntry>,
    search_text: String,
    highlighted: Option<usize>,
    pub form: ContactForm,
    status: Option<String>,
}

impl<'a> ContactWindow<'a> {
    /// Create the window and populate the list from the store
    pub fn new(db: &'a Database) -> Result<Self> {
        let mut window = Self {
            db,
            entries: Vec::new(),
            search_text: String::new(),
            highlighted: None,
            form: ContactForm::default(),
            status: None,
        };
        window.load_contacts()?;
        Ok(window)
    }

    // ==================== LIST ====================

    /// Reload all names from the store, keeping the search filter and,
    /// when it still exists, the highlighted name.
    pub fn load_contacts(&mut self) -> Result<()> {
        let previous = self.highlighted_name().map(str::to_string);

        self.entries = self
            .db
            .list_names_ordered()?
            .into_iter()
            .map(|name| ListEntry { name, hidden: false })
            .collect();

        let text = std::mem::take(&mut self.search_text);
        self.search_contacts(&text);

        if let Some(name) = previous {
            if let Some(idx) = self
                .entries
                .iter()
                .position(|e| !e.hidden && e.name == name)
            {
                self.highlighted = Some(idx);
            }
        }

        tracing::debug!(count = self.entries.len(), "Loaded contact list");
        Ok(())
    }

    /// Hide entries that don't contain `text` (case-insensitive). No re-query.
    pub fn search_contacts(&mut self, text: &str) {
        self.search_text = text.to_string();
        for entry in &mut self.entries {
            entry.hidden = !matches_search(&entry.name, text);
        }

        let still_visible = self
            .highlighted
            .map_or(false, |idx| self.entries.get(idx).map_or(false, |e| !e.hidden));
        if !still_visible {
            self.highlighted = self.entries.iter().position(|e| !e.hidden);
        }
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    pub fn visible_names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| !e.hidden)
            .map(|e| e.name.as_str())
            .collect()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn highlighted_name(&self) -> Option<&str> {
        self.highlighted
            .and_then(|idx| self.entries.get(idx))
            .map(|e| e.name.as_str())
    }

    /// Move the highlight by `delta` visible entries, clamped at both ends
    pub fn move_highlight(&mut self, delta: isize) {
        let visible: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.hidden)
            .map(|(i, _)| i)
            .collect();
        if visible.is_empty() {
            self.highlighted = None;
            return;
        }

        let current = self
            .highlighted
            .and_then(|idx| visible.iter().position(|&v| v == idx))
            .unwrap_or(0) as isize;
        let target = (current + delta).clamp(0, visible.len() as isize - 1) as usize;
        self.highlighted = Some(visible[target]);
    }

    // ==================== SELECTION ====================

    /// Fetch the entry's row and populate every form field. Returns false
    /// when the index is out of range, hidden, or no longer in the store.
    pub fn select(&mut self, index: usize) -> Result<bool> {
        let name = match self.entries.get(index) {
            Some(entry) if !entry.hidden => entry.name.clone(),
            _ => return Ok(false),
        };

        self.highlighted = Some(index);
        match self.db.fetch(&name)? {
            Some(contact) => {
                self.form.load(&contact);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Select the highlighted entry
    pub fn select_highlighted(&mut self) -> Result<bool> {
        match self.highlighted {
            Some(idx) => self.select(idx),
            None => Ok(false),
        }
    }

    // ==================== ACTIONS ====================

    pub fn add_contact(&mut self, dialogs: &mut dyn Dialogs) -> Result<()> {
        let fields = self.form.to_fields();
        if let Err(e) = fields.validate() {
            return self.warn(dialogs, e);
        }

        self.db.insert(&fields)?;
        tracing::info!("Added contact {}", fields.name);

        self.load_contacts()?;
        self.clear_fields();
        self.status = Some("Added.".to_string());
        Ok(())
    }

    /// Update the stored row whose name equals the name field.
    pub fn update_contact(&mut self, dialogs: &mut dyn Dialogs) -> Result<()> {
        let fields = self.form.to_fields();
        if let Err(e) = fields.validate() {
            return self.warn(dialogs, e);
        }

        let rows = self.db.update_by_name(&fields.name, &fields)?;
        tracing::info!("Updated {} row(s) named {}", rows, fields.name);

        self.load_contacts()?;
        self.status = Some(if rows == 0 {
            format!("No contact named {}.", fields.name)
        } else {
            "Updated.".to_string()
        });
        Ok(())
    }

    pub fn delete_contact(&mut self, dialogs: &mut dyn Dialogs) -> Result<()> {
        let name = self.form.name.trim().to_string();
        if name.is_empty() {
            return self.warn(dialogs, FormError::NothingToDelete);
        }

        let question = format!("Are you sure you want to delete {}?", name);
        if !dialogs.confirm("Confirm Deletion", &question)? {
            return Ok(());
        }

        let rows = self.db.delete_by_name(&name)?;
        tracing::info!("Deleted {} row(s) named {}", rows, name);

        self.load_contacts()?;
        self.clear_fields();
        self.status = Some("Deleted.".to_string());
        Ok(())
    }

    pub fn clear_fields(&mut self) {
        self.form.clear();
    }

    fn warn(&self, dialogs: &mut dyn Dialogs, error: FormError) -> Result<()> {
        tracing::debug!("Rejected form: {}", error);
        dialogs.warning("Error", &error.to_string())
    }

    // ==================== STATUS ====================

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }
}
