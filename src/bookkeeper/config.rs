use crate::error::{KeeperError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_BUCKET: &str = "store";
const DEFAULT_DATE_FORMAT: &str = "%d-%m-%Y";
const DEFAULT_DISPLAY_DATE_FORMAT: &str = "%d %B %Y";
const DEFAULT_UNSPECIFIED_TOKEN: &str = "???";

/// Configuration for bookkeeper, stored next to the database as config.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeeperConfig {
    /// Name of the bucket holding the book entries
    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// chrono format used to parse dates the user types (e.g. 31-01-2020)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// chrono format used when listing dates
    #[serde(default = "default_display_date_format")]
    pub display_date_format: String,

    /// Any input starting with this token means "no date recorded"
    #[serde(default = "default_unspecified_token")]
    pub unspecified_token: String,
}

fn default_bucket() -> String {
    DEFAULT_BUCKET.to_string()
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_display_date_format() -> String {
    DEFAULT_DISPLAY_DATE_FORMAT.to_string()
}

fn default_unspecified_token() -> String {
    DEFAULT_UNSPECIFIED_TOKEN.to_string()
}

impl Default for KeeperConfig {
    fn default() -> Self {
        Self {
            bucket: default_bucket(),
            date_format: default_date_format(),
            display_date_format: default_display_date_format(),
            unspecified_token: default_unspecified_token(),
        }
    }
}

impl KeeperConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(KeeperError::Io)?;
        let config: KeeperConfig =
            serde_json::from_str(&content).map_err(KeeperError::Serialization)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.bucket.trim().is_empty() {
            return Err(KeeperError::Config("bucket name cannot be empty".into()));
        }
        // An empty token would make every input "unspecified"
        if self.unspecified_token.is_empty() {
            return Err(KeeperError::Config(
                "unspecified_token cannot be empty".into(),
            ));
        }
        Ok(())
    }
}
