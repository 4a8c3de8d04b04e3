use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod add;
pub mod display;
pub mod form;
pub mod list;
pub mod screen;
pub mod show;
pub mod ui;
pub mod window;

pub use add::run_add;
pub use display::print_contact;
pub use list::run_list;
pub use screen::run_window;
pub use show::run_show;

#[derive(Parser)]
#[command(name = "contactbook")]
#[command(about = "Contact book for the terminal")]
#[command(version)]
pub struct Cli {
    /// Database file (default: <config dir>/contactbook/contacts.db)
    #[arg(long, env = "CONTACTBOOK_DB", value_name = "PATH", global = true)]
    pub db: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List contact names in order
    List(ListArgs),
    /// Show the stored fields of a contact
    Show(ShowArgs),
    /// Add a new contact
    Add(AddArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Only names containing this text (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Exact contact name
    pub name: String,
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(short, long)]
    pub name: Option<String>,
    #[arg(short, long)]
    pub phone: Option<String>,
    #[arg(short, long)]
    pub email: Option<String>,
    #[arg(short, long)]
    pub address: Option<String>,
    /// Family, Friend, Work or Other
    #[arg(short, long)]
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_opens_window() {
        let cli = Cli::try_parse_from(["contactbook"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "contactbook",
            "--db",
            "/tmp/c.db",
            "add",
            "-n",
            "Ada",
            "-c",
            "Work",
        ])
        .unwrap();

        assert_eq!(cli.db, Some(PathBuf::from("/tmp/c.db")));
        match cli.command {
            Some(Commands::Add(args)) => {
                assert_eq!(args.name.as_deref(), Some("Ada"));
                assert_eq!(args.category.as_deref(), Some("Work"));
                assert!(args.phone.is_none());
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_parse_list_search() {
        let cli = Cli::try_parse_from(["contactbook", "list", "--search", "jo", "-v"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Some(Commands::List(args)) => assert_eq!(args.search.as_deref(), Some("jo")),
            _ => panic!("expected list"),
        }
    }
}
