use anyhow::Result;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

mod contacts;
mod schema;

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at the default location, creating it if needed
    pub fn open() -> Result<Self> {
        let path = Self::default_path()?;
        Self::open_at(path)
    }

    pub fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Create parent directories
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        tracing::info!("Opened contact store at {}", path.display());

        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Open in-memory database for testing
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;

        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    pub fn default_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join("contactbook").join("contacts.db"))
    }

    /// Create the contacts table if it is absent. Idempotent.
    pub fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(schema::SCHEMA)?;
        Ok(())
    }

    /// Leave the store without its table so every query fails
    #[cfg(test)]
    pub(crate) fn drop_contacts_table(&self) {
        self.conn.execute_batch("DROP TABLE contacts").unwrap();
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        tracing::debug!("Closing contact store");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContactFields;

    #[test]
    fn test_open_memory() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.count().unwrap(), 0);
    }

    #[test]
    fn test_tables_exist() {
        let db = Database::open_memory().unwrap();

        let tables: Vec<String> = db
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert_eq!(tables, vec!["contacts".to_string()]);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let db = Database::open_memory().unwrap();
        db.insert(&ContactFields::new("Ada")).unwrap();

        db.initialize().unwrap();
        db.initialize().unwrap();

        assert_eq!(db.count().unwrap(), 1);
    }

    #[test]
    fn test_open_at_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("contacts.db");

        {
            let db = Database::open_at(&path).unwrap();
            db.insert(&ContactFields::new("Grace")).unwrap();
        }

        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.list_names_ordered().unwrap(), vec!["Grace".to_string()]);
    }

    #[test]
    fn test_missing_table_surfaces_errors() {
        let db = Database::open_memory().unwrap();
        db.drop_contacts_table();

        assert!(db.count().is_err());
        assert!(db.list_names_ordered().is_err());
        assert!(db.fetch("Ada").is_err());
        assert!(db.insert(&ContactFields::new("Ada")).is_err());
        assert!(db.delete_by_name("Ada").is_err());

        // initialize recreates it
        db.initialize().unwrap();
        assert_eq!(db.count().unwrap(), 0);
    }
}
