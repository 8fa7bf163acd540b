//! Movie Catalog CLI
//!
//! # Commands
//!
//! - `menu` - Interactive session (default)
//! - `report` - Load a CSV and print the load report
//! - `list` - Load a CSV and print the movies that were accepted
//! - `average` - Load a CSV and print the average running time

mod cli;

use clap::{Parser, Subcommand};
use cli::commands::{self, OutputFormat};
use cli::menu::Menu;
use movie_catalog::MovieStore;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// In-memory movie catalog.
#[derive(Parser)]
#[command(name = "movie-catalog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// CSV file to load before the interactive menu starts
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu (default)
    Menu,

    /// Load a CSV file and print the load report
    Report {
        /// CSV file (id,title,director,year,duration,genre,rating)
        path: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Load a CSV file and print the accepted movies
    List {
        /// CSV file (id,title,director,year,duration,genre,rating)
        path: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Load a CSV file and print the average running time
    Average {
        /// CSV file (id,title,director,year,duration,genre,rating)
        path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stay quiet by default so prompts stay readable
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut stdout = io::stdout().lock();

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            let mut store = MovieStore::new();
            if let Some(path) = &cli.file {
                let report = store.load_csv(path);
                info!(path = %path.display(), %report, "preloaded csv");
                writeln!(stdout, "{}", report.summary())?;
            }
            Menu::new(store, io::stdin().lock(), stdout).run()?;
        }
        Commands::Report { path, format } => commands::report(&path, format, &mut stdout)?,
        Commands::List { path, format } => commands::list(&path, format, &mut stdout)?,
        Commands::Average { path } => commands::average(&path, &mut stdout)?,
    }

    Ok(())
}
