use anyhow::Result;
use rusqlite::{params, OptionalExtension, Row};

use super::Database;
use crate::models::{Category, Contact, ContactFields};

impl Database {
    // ==================== CONTACT CREATE ====================

    /// Insert a contact and return its assigned id
    pub fn insert(&self, fields: &ContactFields) -> Result<i64> {
        self.conn.execute(
            r#"INSERT INTO contacts (name, phone, email, address, category)
               VALUES (?, ?, ?, ?, ?)"#,
            params![
                fields.name,
                fields.phone,
                fields.email,
                fields.address,
                fields.category.as_str(),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, name = %fields.name, "Inserted contact");
        Ok(id)
    }

    // ==================== CONTACT READ ====================

    /// All names in ascending order
    pub fn list_names_ordered(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT name FROM contacts ORDER BY name")?;

        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;

        Ok(names)
    }

    /// Look up a contact by exact name. With duplicates the oldest row wins.
    pub fn fetch(&self, name: &str) -> Result<Option<Contact>> {
        let contact = self
            .conn
            .query_row(
                "SELECT id, name, phone, email, address, category FROM contacts
                 WHERE name = ? ORDER BY id LIMIT 1",
                [name],
                Self::row_to_contact,
            )
            .optional()?;

        Ok(contact)
    }

    pub fn count(&self) -> Result<u32> {
        let count: u32 = self
            .conn
            .query_row("SELECT COUNT(*) FROM contacts", [], |row| row.get(0))?;
        Ok(count)
    }

    // ==================== CONTACT UPDATE ====================

    /// Overwrite phone, email, address and category of every row named `name`.
    /// Returns the number of rows changed.
    pub fn update_by_name(&self, name: &str, fields: &ContactFields) -> Result<usize> {
        let rows = self.conn.execute(
            r#"UPDATE contacts SET phone = ?, email = ?, address = ?, category = ?
               WHERE name = ?"#,
            params![
                fields.phone,
                fields.email,
                fields.address,
                fields.category.as_str(),
                name,
            ],
        )?;
        tracing::debug!(name, rows, "Updated contact");
        Ok(rows)
    }

    // ==================== CONTACT DELETE ====================

    /// Delete every row named `name`. Returns the number of rows removed.
    pub fn delete_by_name(&self, name: &str) -> Result<usize> {
        let rows = self
            .conn
            .execute("DELETE FROM contacts WHERE name = ?", [name])?;
        tracing::debug!(name, rows, "Deleted contact");
        Ok(rows)
    }

    // ==================== ROW MAPPING ====================

    fn row_to_contact(row: &Row) -> rusqlite::Result<Contact> {
        let category: Option<String> = row.get("category")?;

        Ok(Contact {
            id: row.get("id")?,
            name: row.get("name")?,
            phone: row.get("phone")?,
            email: row.get("email")?,
            address: row.get("address")?,
            category: category
                .as_deref()
                .map(Category::parse)
                .unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str, phone: &str, category: Category) -> ContactFields {
        ContactFields {
            name: name.to_string(),
            phone: Some(phone.to_string()),
            email: Some(format!("{}@example.com", name.to_lowercase())),
            address: Some("1 Main St\nSpringfield".to_string()),
            category,
        }
    }

    #[test]
    fn test_insert_and_fetch() {
        let db = Database::open_memory().unwrap();

        let id = db.insert(&fields("John", "555-1234", Category::Work)).unwrap();

        let contact = db.fetch("John").unwrap().unwrap();
        assert_eq!(contact.id, id);
        assert_eq!(contact.name, "John");
        assert_eq!(contact.phone, Some("555-1234".to_string()));
        assert_eq!(contact.email, Some("john@example.com".to_string()));
        assert_eq!(contact.address, Some("1 Main St\nSpringfield".to_string()));
        assert_eq!(contact.category, Category::Work);
    }

    #[test]
    fn test_fetch_missing() {
        let db = Database::open_memory().unwrap();
        assert!(db.fetch("Nobody").unwrap().is_none());
    }

    #[test]
    fn test_fetch_is_exact_match() {
        let db = Database::open_memory().unwrap();
        db.insert(&ContactFields::new("John")).unwrap();

        assert!(db.fetch("john").unwrap().is_none());
        assert!(db.fetch("Jo").unwrap().is_none());
    }

    #[test]
    fn test_fetch_duplicate_returns_oldest() {
        let db = Database::open_memory().unwrap();
        let first = db.insert(&fields("Sam", "111", Category::Friend)).unwrap();
        db.insert(&fields("Sam", "222", Category::Work)).unwrap();

        let contact = db.fetch("Sam").unwrap().unwrap();
        assert_eq!(contact.id, first);
        assert_eq!(contact.phone, Some("111".to_string()));
    }

    #[test]
    fn test_optional_fields_stored_as_null() {
        let db = Database::open_memory().unwrap();
        db.insert(&ContactFields::new("Bare")).unwrap();

        let contact = db.fetch("Bare").unwrap().unwrap();
        assert_eq!(contact.phone, None);
        assert_eq!(contact.email, None);
        assert_eq!(contact.address, None);
        assert_eq!(contact.category, Category::Family);
    }

    #[test]
    fn test_unknown_category_reads_as_other() {
        let db = Database::open_memory().unwrap();
        db.conn
            .execute(
                "INSERT INTO contacts (name, category) VALUES ('Legacy', 'Colleague')",
                [],
            )
            .unwrap();
        db.conn
            .execute("INSERT INTO contacts (name) VALUES ('NoCategory')", [])
            .unwrap();

        assert_eq!(db.fetch("Legacy").unwrap().unwrap().category, Category::Other);
        assert_eq!(
            db.fetch("NoCategory").unwrap().unwrap().category,
            Category::Family
        );
    }

    #[test]
    fn test_list_names_ordered() {
        let db = Database::open_memory().unwrap();
        for name in ["Charlie", "alice", "Bob", "Alice"] {
            db.insert(&ContactFields::new(name)).unwrap();
        }

        let names = db.list_names_ordered().unwrap();
        assert_eq!(names, vec!["Alice", "Bob", "Charlie", "alice"]);
    }

    #[test]
    fn test_count() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.count().unwrap(), 0);

        db.insert(&ContactFields::new("One")).unwrap();
        db.insert(&ContactFields::new("Two")).unwrap();
        assert_eq!(db.count().unwrap(), 2);
    }

    #[test]
    fn test_update_by_name() {
        let db = Database::open_memory().unwrap();
        db.insert(&fields("John", "555-1234", Category::Work)).unwrap();
        db.insert(&fields("Jane", "555-9999", Category::Friend)).unwrap();

        let mut changed = fields("John", "555-0000", Category::Family);
        changed.email = None;
        let rows = db.update_by_name("John", &changed).unwrap();
        assert_eq!(rows, 1);

        let john = db.fetch("John").unwrap().unwrap();
        assert_eq!(john.phone, Some("555-0000".to_string()));
        assert_eq!(john.email, None);
        assert_eq!(john.category, Category::Family);

        // Other rows untouched
        let jane = db.fetch("Jane").unwrap().unwrap();
        assert_eq!(jane.phone, Some("555-9999".to_string()));
        assert_eq!(db.count().unwrap(), 2);
    }

    #[test]
    fn test_update_by_name_ignores_fields_name() {
        let db = Database::open_memory().unwrap();
        db.insert(&ContactFields::new("John")).unwrap();

        let renamed = fields("Johnny", "123", Category::Work);
        db.update_by_name("John", &renamed).unwrap();

        assert!(db.fetch("Johnny").unwrap().is_none());
        assert_eq!(db.fetch("John").unwrap().unwrap().phone, Some("123".to_string()));
    }

    #[test]
    fn test_update_missing_name_changes_nothing() {
        let db = Database::open_memory().unwrap();
        db.insert(&fields("John", "555-1234", Category::Work)).unwrap();

        let rows = db
            .update_by_name("Ghost", &fields("Ghost", "000", Category::Other))
            .unwrap();
        assert_eq!(rows, 0);
        assert_eq!(
            db.fetch("John").unwrap().unwrap().phone,
            Some("555-1234".to_string())
        );
    }

    #[test]
    fn test_delete_by_name() {
        let db = Database::open_memory().unwrap();
        db.insert(&ContactFields::new("John")).unwrap();
        db.insert(&ContactFields::new("Jane")).unwrap();

        assert_eq!(db.delete_by_name("John").unwrap(), 1);
        assert!(db.fetch("John").unwrap().is_none());
        assert_eq!(db.list_names_ordered().unwrap(), vec!["Jane"]);
    }

    #[test]
    fn test_delete_nonexistent() {
        let db = Database::open_memory().unwrap();
        db.insert(&ContactFields::new("John")).unwrap();

        assert_eq!(db.delete_by_name("Ghost").unwrap(), 0);
        assert_eq!(db.count().unwrap(), 1);
    }

    #[test]
    fn test_delete_removes_all_duplicates() {
        let db = Database::open_memory().unwrap();
        db.insert(&ContactFields::new("Sam")).unwrap();
        db.insert(&ContactFields::new("Sam")).unwrap();
        db.insert(&ContactFields::new("Pat")).unwrap();

        assert_eq!(db.delete_by_name("Sam").unwrap(), 2);
        assert_eq!(db.list_names_ordered().unwrap(), vec!["Pat"]);
    }
}
