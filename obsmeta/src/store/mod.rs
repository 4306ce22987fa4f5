//! Persistence collaborators for the site directory.
//!
//! The hierarchy index does not persist itself; implementations of
//! [`FacilityRepository`] serialize facility records and the resolved
//! forest snapshot. [`LocalStore`] keeps everything in memory for tests and
//! local development, [`FileStore`] writes JSON documents under a
//! configurable root directory.

pub mod error;
pub mod files;
pub mod local;
pub mod repository;

pub use error::{StoreError, StoreResult};
pub use files::FileStore;
pub use local::LocalStore;
pub use repository::FacilityRepository;
