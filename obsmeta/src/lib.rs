//! Metadata standard for astronomical observing facilities.
//!
//! The crate has two halves:
//!
//! - [`models`]: serializable value types describing observing facilities,
//!   their identities, owners, manufacturers and contact information.
//! - [`hierarchy`]: the observing-site hierarchy index, which incrementally
//!   assembles a forest of parent/child relationships among sites from
//!   partial, locally-declared hints, without any site ever being told its
//!   parent directly.
//!
//! [`SiteDirectory`] ties the two together as the single owner of the index
//! plus the facility records, and the [`store`] module provides the
//! persistence collaborators that serialize the resolved forest.

pub mod directory;
pub mod hierarchy;
pub mod io;
pub mod models;
pub mod store;

pub use directory::SiteDirectory;
pub use hierarchy::{HierarchyError, HierarchyIndex, HierarchyResult, NodeRegistry, SiteNode};
pub use models::{FacilityKind, Identity, ObservingFacility, SiteId};
