//! File-path, JSON and configuration helpers.
//!
//! Thin by design: the hierarchy index never touches the filesystem; these
//! helpers give the persistence layer a fixed on-disk layout and uniform
//! encode/decode behaviour.

pub mod config;
pub mod json;
pub mod paths;

pub use config::{ConfigError, DirectoryConfig};
pub use json::{ForestSnapshot, SiteRecord};
pub use paths::DataStorePaths;
