use crate::models::Contact;

/// Format a contact with clean formatting (only non-empty fields)
pub fn format_contact(contact: &Contact) -> Vec<String> {
    // Header - just the name
    let mut lines = vec![contact.name.clone(), String::new()];

    if let Some(ref phone) = contact.phone {
        lines.push(format!("  {}", phone));
    }
    if let Some(ref email) = contact.email {
        lines.push(format!("  {}", email));
    }

    // Addresses keep their line breaks, indented under the contact
    if let Some(ref address) = contact.address {
        for line in address.lines() {
            lines.push(format!("  {}", line));
        }
    }

    lines.push(format!("  {}", contact.category));
    lines
}

/// Print a contact to stdout
pub fn print_contact(contact: &Contact) {
    for line in format_contact(contact) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    #[test]
    fn test_format_full_contact() {
        let contact = Contact {
            id: 1,
            name: "John".to_string(),
            phone: Some("555-1234".to_string()),
            email: Some("john@example.com".to_string()),
            address: Some("1 Elm St\nSpringfield".to_string()),
            category: Category::Work,
        };

        assert_eq!(
            format_contact(&contact),
            vec![
                "John",
                "",
                "  555-1234",
                "  john@example.com",
                "  1 Elm St",
                "  Springfield",
                "  Work",
            ]
        );
    }

    #[test]
    fn test_format_skips_empty_fields() {
        let contact = Contact {
            id: 1,
            name: "Bare".to_string(),
            phone: None,
            email: None,
            address: None,
            category: Category::Family,
        };

        assert_eq!(format_contact(&contact), vec!["Bare", "", "  Family"]);
    }
}
