//! Directory configuration file support.
//!
//! Reads the data-store configuration from a TOML file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::paths::CONFIG_FILE_NAME;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("No {CONFIG_FILE_NAME} found in standard locations")]
    NotFound,
}

/// Directory configuration from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    pub directory: DirectorySettings,
    #[serde(default)]
    pub store: StoreSettings,
}

/// Identity of the directory this store serves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectorySettings {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Data-store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_data_root")]
    pub data_root: PathBuf,
    #[serde(default = "default_pretty_json")]
    pub pretty_json: bool,
}

fn default_data_root() -> PathBuf {
    PathBuf::from("obsmeta-data")
}

fn default_pretty_json() -> bool {
    true
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            data_root: default_data_root(),
            pretty_json: default_pretty_json(),
        }
    }
}

impl DirectoryConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: DirectoryConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `obsmeta.toml` in the current directory, then the
    /// parent directory.
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(ConfigError::NotFound)
    }
}
