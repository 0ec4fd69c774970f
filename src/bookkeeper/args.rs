use clap::Parser;
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("KEEPER_GIT_HASH");
    const GIT_DATE: &str = env!("KEEPER_GIT_DATE");
    const IS_RELEASE: &str = env!("KEEPER_IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "bookkeeper", version = get_version())]
#[command(about = "Keep track of the books you are reading", long_about = None)]
pub struct Cli {
    /// Database file, or a directory to keep books.db in
    /// (defaults to the user data directory)
    pub location: Option<PathBuf>,

    /// Print every bucket and raw entry in the database, then exit
    #[arg(long)]
    pub dump: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
