use anyhow::{anyhow, Result};

use crate::cli::display::print_contact;
use crate::db::Database;

/// Execute the show command. Returns whether a contact was found.
pub fn run_show(db: &Database, name: &str) -> Result<bool> {
    if name.is_empty() {
        return Err(anyhow!("Name cannot be empty."));
    }

    match db.fetch(name)? {
        Some(contact) => {
            print_contact(&contact);
            Ok(true)
        }
        None => {
            println!("No contact named {}.", name);
            Ok(false)
        }
    }
}
