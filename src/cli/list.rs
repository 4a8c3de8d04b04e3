use anyhow::Result;

use crate::cli::window::matches_search;
use crate::db::Database;

/// Sorted names, filtered the same way as the window's search field
pub fn list_names(db: &Database, search: Option<&str>) -> Result<Vec<String>> {
    let names = db.list_names_ordered()?;

    Ok(match search {
        Some(text) => names
            .into_iter()
            .filter(|name| matches_search(name, text))
            .collect(),
        None => names,
    })
}

/// Execute the list command
pub fn run_list(db: &Database, search: Option<&str>) -> Result<()> {
    let names = list_names(db, search)?;

    if names.is_empty() {
        println!("No contacts.");
        return Ok(());
    }

    for name in names {
        println!("{}", name);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::window::tests::setup_test_db;

    #[test]
    fn test_list_all_sorted() {
        let db = setup_test_db();
        let names = list_names(&db, None).unwrap();
        assert_eq!(names, vec!["Bob", "Jodie", "John", "alice"]);
    }

    #[test]
    fn test_list_with_search() {
        let db = setup_test_db();
        let names = list_names(&db, Some("jO")).unwrap();
        assert_eq!(names, vec!["Jodie", "John"]);
    }

    #[test]
    fn test_list_empty_store() {
        let db = Database::open_memory().unwrap();
        assert!(list_names(&db, None).unwrap().is_empty());
        run_list(&db, None).unwrap();
    }
}
