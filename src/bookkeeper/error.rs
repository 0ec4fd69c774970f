use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeeperError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0} is not a valid book state")]
    InvalidState(String),

    #[error("Couldn't parse the date: {0}")]
    InvalidDateFormat(String),

    #[error("Book number {index} does not exist (there are {len} books)")]
    InvalidIndex { index: usize, len: usize },

    #[error("Book not found: {0}")]
    NotFound(u64),

    #[error("Failed to retrieve the bucket \"{0}\"")]
    BucketMissing(String),

    #[error("Failed to open the database at {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl KeeperError {
    /// Errors caused by what the user typed. The shell re-prompts on these.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            KeeperError::InvalidInput(_)
                | KeeperError::InvalidState(_)
                | KeeperError::InvalidDateFormat(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, KeeperError>;
