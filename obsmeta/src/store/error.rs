//! Error types for store operations.

use crate::hierarchy::HierarchyError;
use crate::io::config::ConfigError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Snapshot checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("Store is not healthy")]
    Unhealthy,

    #[error(transparent)]
    Configuration(#[from] ConfigError),

    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),
}
