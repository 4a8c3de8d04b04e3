use anyhow::{anyhow, Result};

use crate::cli::ui::{prompt_choice, prompt_field_optional, FormResult};
use crate::db::Database;
use crate::models::{non_empty, Category, ContactFields};

/// Execute the add command
pub fn run_add(
    db: &Database,
    name: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    address: Option<String>,
    category: Option<String>,
) -> Result<()> {
    // If no options provided, run interactive mode
    let all_none = name.is_none()
        && phone.is_none()
        && email.is_none()
        && address.is_none()
        && category.is_none();

    let fields = if all_none {
        match interactive_mode()? {
            Some(fields) => fields,
            None => {
                println!("Cancelled.");
                return Ok(());
            }
        }
    } else {
        let category = match category {
            Some(label) => Category::from_label(&label).ok_or_else(|| {
                anyhow!(
                    "Unknown category: {} (expected one of {})",
                    label,
                    Category::ALL
                        .iter()
                        .map(|c| c.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })?,
            None => Category::default(),
        };

        ContactFields {
            name: name.unwrap_or_default().trim().to_string(),
            phone: phone.and_then(non_empty),
            email: email.and_then(non_empty),
            address: address.and_then(non_empty),
            category,
        }
    };

    fields.validate()?;
    db.insert(&fields)?;

    println!("\nCreated: {}", fields.name);
    Ok(())
}

fn interactive_mode() -> Result<Option<ContactFields>> {
    let mut values = Vec::with_capacity(4);
    for field in ["name", "phone", "email", "address"] {
        match prompt_field_optional(field)? {
            FormResult::Value(v) => values.push(v),
            FormResult::Cancelled => return Ok(None),
        }
    }

    let category = match prompt_choice("category", Category::ALL)? {
        FormResult::Value(c) => c,
        FormResult::Cancelled => return Ok(None),
    };

    let mut values = values.into_iter();
    let mut next = || values.next().unwrap_or_default();
    Ok(Some(ContactFields {
        name: next(),
        phone: non_empty(next()),
        email: non_empty(next()),
        address: non_empty(next()),
        category,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_contact_direct() {
        let db = Database::open_memory().unwrap();

        run_add(
            &db,
            Some("John".to_string()),
            Some("555-1234".to_string()),
            Some("john@example.com".to_string()),
            Some("1 Elm St".to_string()),
            Some("work".to_string()),
        )
        .unwrap();

        let john = db.fetch("John").unwrap().unwrap();
        assert_eq!(john.phone, Some("555-1234".to_string()));
        assert_eq!(john.email, Some("john@example.com".to_string()));
        assert_eq!(john.address, Some("1 Elm St".to_string()));
        assert_eq!(john.category, Category::Work);
    }

    #[test]
    fn test_add_name_only_defaults_category() {
        let db = Database::open_memory().unwrap();

        run_add(&db, Some("Alice".to_string()), None, None, None, None).unwrap();

        let alice = db.fetch("Alice").unwrap().unwrap();
        assert_eq!(alice.phone, None);
        assert_eq!(alice.category, Category::Family);
    }

    #[test]
    fn test_add_requires_name() {
        let db = Database::open_memory().unwrap();

        let result = run_add(&db, None, Some("555".to_string()), None, None, None);
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "Name is required.");
        assert_eq!(db.count().unwrap(), 0);
    }

    #[test]
    fn test_add_unknown_category() {
        let db = Database::open_memory().unwrap();

        let result = run_add(
            &db,
            Some("John".to_string()),
            None,
            None,
            None,
            Some("Colleague".to_string()),
        );
        assert!(result.is_err());
        assert_eq!(db.count().unwrap(), 0);
    }
}
