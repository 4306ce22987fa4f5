//! The repository contract the domain layer programs against.

use async_trait::async_trait;

use super::error::StoreResult;
use crate::io::json::ForestSnapshot;
use crate::models::{ObservingFacility, SiteId};

/// Storage backend for facility records and forest snapshots.
///
/// Implementations serialize `(id, parent, children)` tuples plus the full
/// facility documents; they never re-run hierarchy resolution themselves.
#[async_trait]
pub trait FacilityRepository: Send + Sync {
    async fn health_check(&self) -> StoreResult<bool>;

    async fn store_facility(&self, facility: &ObservingFacility) -> StoreResult<()>;

    async fn get_facility(&self, id: &SiteId) -> StoreResult<ObservingFacility>;

    /// All stored facility ids, sorted.
    async fn list_facilities(&self) -> StoreResult<Vec<SiteId>>;

    async fn delete_facility(&self, id: &SiteId) -> StoreResult<()>;

    async fn store_snapshot(&self, snapshot: &ForestSnapshot) -> StoreResult<()>;

    async fn load_snapshot(&self) -> StoreResult<ForestSnapshot>;
}
