use bookkeeper::api::KeeperApi;
use bookkeeper::config::KeeperConfig;
use bookkeeper::error::{KeeperError, Result};
use bookkeeper::shell::Shell;
use bookkeeper::store::sqlite::SqliteStore;
use bookkeeper::store::BookStore;
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod args;
use args::Cli;

const DB_FILENAME: &str = "books.db";
const DB_EXTENSION: &str = "db";
const LOG_ENV: &str = "BOOKKEEPER_LOG";

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let db_path = match cli.location {
        Some(location) => resolve_db_path(&location)?,
        None => resolve_db_path(&default_data_dir()?)?,
    };
    let db_dir = db_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let config = KeeperConfig::load(&db_dir)?;
    tracing::debug!(path = %db_path.display(), ?config, "starting");

    let store = SqliteStore::open(&db_path, &config)?;

    if cli.dump {
        let dumped = print_dump(&store);
        let closed = store.close();
        return dumped.and(closed);
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut shell = Shell::new(KeeperApi::new(store), stdin.lock(), stdout.lock(), config);
    let outcome = shell.run();
    // Close on every path out of the loop, including a failed terminal
    let closed = shell.into_api().close();
    outcome.and(closed)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn default_data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "bookkeeper", "bookkeeper")
        .ok_or_else(|| KeeperError::Config("Could not determine the data directory".into()))?;
    let dir = dirs.data_dir().to_path_buf();
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Anything not ending in `.db` is taken as a directory to keep `books.db` in.
fn resolve_db_path(location: &Path) -> Result<PathBuf> {
    let is_db_file = location
        .extension()
        .is_some_and(|ext| ext == DB_EXTENSION);
    let path = if is_db_file {
        location.to_path_buf()
    } else {
        location.join(DB_FILENAME)
    };

    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

fn print_dump(store: &SqliteStore) -> Result<()> {
    for bucket in store.dump()? {
        println!(
            "Bucket name: {} (sequence {})\n----------",
            bucket.name.bold(),
            bucket.sequence
        );
        for entry in &bucket.entries {
            println!("{}", entry);
        }
        println!("\n~~~~~~~~~~\n");
    }
    Ok(())
}
