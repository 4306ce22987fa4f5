//! In-memory store implementation.
//!
//! Suitable for unit tests and local development: fast, deterministic and
//! isolated. All data lives in process memory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::error::{StoreError, StoreResult};
use super::repository::FacilityRepository;
use crate::io::json::ForestSnapshot;
use crate::models::{ObservingFacility, SiteId};

#[derive(Default)]
struct LocalData {
    facilities: HashMap<SiteId, ObservingFacility>,
    snapshot: Option<ForestSnapshot>,
    is_healthy: bool,
}

/// In-memory facility store.
#[derive(Clone)]
pub struct LocalStore {
    data: Arc<RwLock<LocalData>>,
}

impl Default for LocalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStore {
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData {
                is_healthy: true,
                ..Default::default()
            })),
        }
    }

    /// Set the health status, for exercising connection-failure paths in
    /// tests.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().unwrap().is_healthy = healthy;
    }

    /// Drop all stored data, keeping the health flag.
    pub fn clear(&self) {
        let mut data = self.data.write().unwrap();
        data.facilities.clear();
        data.snapshot = None;
    }

    pub fn facility_count(&self) -> usize {
        self.data.read().unwrap().facilities.len()
    }

    fn check_health(&self) -> StoreResult<()> {
        if !self.data.read().unwrap().is_healthy {
            return Err(StoreError::Unhealthy);
        }
        Ok(())
    }
}

#[async_trait]
impl FacilityRepository for LocalStore {
    async fn health_check(&self) -> StoreResult<bool> {
        Ok(self.data.read().unwrap().is_healthy)
    }

    async fn store_facility(&self, facility: &ObservingFacility) -> StoreResult<()> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();
        data.facilities
            .insert(facility.id().clone(), facility.clone());
        Ok(())
    }

    async fn get_facility(&self, id: &SiteId) -> StoreResult<ObservingFacility> {
        self.check_health()?;
        self.data
            .read()
            .unwrap()
            .facilities
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("Facility {id} not found")))
    }

    async fn list_facilities(&self) -> StoreResult<Vec<SiteId>> {
        self.check_health()?;
        let mut ids: Vec<SiteId> = self
            .data
            .read()
            .unwrap()
            .facilities
            .keys()
            .cloned()
            .collect();
        ids.sort();
        Ok(ids)
    }

    async fn delete_facility(&self, id: &SiteId) -> StoreResult<()> {
        self.check_health()?;
        let removed = self.data.write().unwrap().facilities.remove(id);
        if removed.is_none() {
            return Err(StoreError::NotFound(format!("Facility {id} not found")));
        }
        Ok(())
    }

    async fn store_snapshot(&self, snapshot: &ForestSnapshot) -> StoreResult<()> {
        self.check_health()?;
        self.data.write().unwrap().snapshot = Some(snapshot.clone());
        Ok(())
    }

    async fn load_snapshot(&self) -> StoreResult<ForestSnapshot> {
        self.check_health()?;
        self.data
            .read()
            .unwrap()
            .snapshot
            .clone()
            .ok_or_else(|| StoreError::NotFound("No snapshot stored".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FacilityKind, Identity};

    fn facility(id: &str) -> ObservingFacility {
        ObservingFacility::new(Identity::new(id, id), FacilityKind::Site)
    }

    #[tokio::test]
    async fn store_and_retrieve_facility() {
        let store = LocalStore::new();
        let site = facility("a");

        store.store_facility(&site).await.unwrap();
        let back = store.get_facility(&SiteId::from("a")).await.unwrap();
        assert_eq!(back, site);
    }

    #[tokio::test]
    async fn list_is_sorted_by_id() {
        let store = LocalStore::new();
        store.store_facility(&facility("zeta")).await.unwrap();
        store.store_facility(&facility("alpha")).await.unwrap();

        let ids = store.list_facilities().await.unwrap();
        assert_eq!(ids, vec![SiteId::from("alpha"), SiteId::from("zeta")]);
    }

    #[tokio::test]
    async fn missing_facility_is_not_found() {
        let store = LocalStore::new();
        let result = store.get_facility(&SiteId::from("ghost")).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn unhealthy_store_rejects_operations() {
        let store = LocalStore::new();
        store.set_healthy(false);

        assert!(!store.health_check().await.unwrap());
        let result = store.store_facility(&facility("a")).await;
        assert!(matches!(result, Err(StoreError::Unhealthy)));
    }

    #[tokio::test]
    async fn snapshot_slot_roundtrips() {
        let store = LocalStore::new();
        assert!(matches!(
            store.load_snapshot().await,
            Err(StoreError::NotFound(_))
        ));

        let snapshot = ForestSnapshot::new(Vec::new());
        store.store_snapshot(&snapshot).await.unwrap();
        assert_eq!(store.load_snapshot().await.unwrap(), snapshot);
    }
}
