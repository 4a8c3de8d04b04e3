use clap::Parser;
use contactbook::cli::{run_add, run_list, run_show, run_window, Cli, Commands};
use contactbook::db::Database;
use contactbook::logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_file.as_deref())?;

    let db = match cli.db {
        Some(path) => Database::open_at(path)?,
        None => Database::open()?,
    };

    let result = match cli.command {
        None => {
            // No subcommand provided - open the contact window
            run_window(&db)
        }
        Some(Commands::List(args)) => run_list(&db, args.search.as_deref()),
        Some(Commands::Show(args)) => run_show(&db, &args.name).map(|_| ()),
        Some(Commands::Add(args)) => run_add(
            &db,
            args.name,
            args.phone,
            args.email,
            args.address,
            args.category,
        ),
    };

    if let Err(ref e) = result {
        tracing::error!("Fatal error: {:#}", e);
    }
    result
}
