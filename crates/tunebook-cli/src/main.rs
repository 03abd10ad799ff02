use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tunebook_etl::Config;

mod commands;
mod logging;
mod output;

#[derive(Debug, Parser)]
#[command(name = "tunebook", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the database (default: ~/.local/share/tunebook/tunes.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Directory of numbered book folders (default: ./abc_books)
    #[arg(long, global = true)]
    books_dir: Option<PathBuf>,

    /// Print query results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Parse every book folder and load the tunes into the database
    ///
    /// Looks for numbered subdirectories (0, 1, 2, ...) of the books
    /// directory and parses every `.abc` file inside them. Each file may
    /// hold many tunes; a tune starts at its `X:` line and its `T:`, `R:`,
    /// `M:` and `K:` headers are stored alongside the full notation.
    ///
    /// By default the tunes table is dropped and rebuilt first. Files that
    /// cannot be read are reported and skipped.
    Load {
        /// Keep existing tunes and append to them instead of resetting
        #[arg(long)]
        append: bool,
    },
    /// List books and their tune counts
    Books,
    /// Show the tunes in one book
    Book {
        /// Book number
        number: i64,
    },
    /// Show tunes whose rhythm contains TERM (e.g. reel, jig)
    Rhythm {
        /// Rhythm text to look for, case-insensitive
        term: String,
    },
    /// Search tune titles for TERM
    Search {
        /// Title text to look for, case-insensitive
        term: String,
    },
    /// Show the full ABC notation for a tune
    Show {
        /// Tune id as listed by the other commands
        id: i64,
    },
    /// Show the most common keys
    Keys {
        /// How many keys to list
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Create the config file with defaults
    Init,
    /// Print an example config file
    Example,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load()?.with_overrides(cli.db, cli.books_dir);
    logging::init(&config.logging, cli.verbose)?;

    let json = cli.json;
    match cli.command {
        Commands::Load { append } => commands::run_load(&config, append)?,
        Commands::Books => commands::list_books(&config, json)?,
        Commands::Book { number } => commands::list_book(&config, number, json)?,
        Commands::Rhythm { term } => commands::list_rhythm(&config, &term, json)?,
        Commands::Search { term } => commands::search_titles(&config, &term, json)?,
        Commands::Show { id } => commands::show_tune(&config, id, json)?,
        Commands::Keys { top } => commands::list_keys(&config, top, json)?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show_config(&config)?,
            ConfigAction::Path => commands::config::show_path()?,
            ConfigAction::Init => commands::config::init_config()?,
            ConfigAction::Example => commands::config::show_example()?,
        },
    }

    Ok(())
}
