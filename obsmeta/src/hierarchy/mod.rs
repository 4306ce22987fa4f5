//! The observing-site hierarchy index.
//!
//! Sites arrive one at a time, each carrying only a hint set: the ids its
//! author believes are (or will become) its sub-sites. The index
//! reconstructs a forest of parent/child links from those mutual, possibly
//! asymmetric claims as the data arrives, in a single pass and in any order.
//!
//! Storage is arena style: every node is owned by the [`NodeRegistry`] and
//! parent/children are held as [`crate::models::SiteId`]s, never as
//! references, so the structure has no ownership cycles and serializes
//! directly.

pub mod error;
pub mod index;
pub mod node;

pub use error::{HierarchyError, HierarchyResult};
pub use index::HierarchyIndex;
pub use node::{NodeRegistry, SiteNode};
