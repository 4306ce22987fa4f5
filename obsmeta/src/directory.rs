//! The site directory: single owner of the hierarchy index and the
//! facility records.
//!
//! There is no process-wide registry; callers create a [`SiteDirectory`]
//! and pass it (or a clone of the handle) to whoever needs it. All writes
//! go through one write lock, so insertion is atomic with respect to
//! readers; reads share a read lock.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::hierarchy::{HierarchyIndex, HierarchyResult, SiteNode};
use crate::io::json::ForestSnapshot;
use crate::models::{ObservingFacility, SiteId};

#[derive(Debug, Default)]
struct DirectoryData {
    index: HierarchyIndex,
    facilities: HashMap<SiteId, ObservingFacility>,
}

/// Cloneable handle to a shared site directory.
#[derive(Debug, Clone, Default)]
pub struct SiteDirectory {
    data: Arc<RwLock<DirectoryData>>,
}

impl SiteDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a facility record and resolve its place in the forest from
    /// its declared sub-site hints. All-or-nothing: on error neither the
    /// record nor the index changes.
    pub fn add_facility(&self, facility: ObservingFacility) -> HierarchyResult<()> {
        let mut data = self.data.write().unwrap();
        let id = facility.id().clone();
        data.index.insert(id.clone(), facility.hints().to_vec())?;
        data.facilities.insert(id.clone(), facility);
        log::debug!("registered facility {id}");
        Ok(())
    }

    /// Remove a facility and its node; the node's children are promoted to
    /// roots.
    pub fn remove_facility(&self, id: &SiteId) -> HierarchyResult<()> {
        let mut data = self.data.write().unwrap();
        data.index.remove(id)?;
        data.facilities.remove(id);
        log::info!("removed facility {id}");
        Ok(())
    }

    pub fn facility(&self, id: &SiteId) -> Option<ObservingFacility> {
        self.data.read().unwrap().facilities.get(id).cloned()
    }

    /// The site's node record, if registered.
    pub fn node(&self, id: &SiteId) -> Option<SiteNode> {
        self.data.read().unwrap().index.find(id).cloned()
    }

    pub fn contains(&self, id: &SiteId) -> bool {
        self.data.read().unwrap().index.contains(id)
    }

    pub fn roots(&self) -> Vec<SiteId> {
        self.data.read().unwrap().index.roots().to_vec()
    }

    pub fn parent(&self, id: &SiteId) -> Option<SiteId> {
        self.data.read().unwrap().index.parent(id).cloned()
    }

    pub fn children(&self, id: &SiteId) -> Option<Vec<SiteId>> {
        self.data
            .read()
            .unwrap()
            .index
            .children(id)
            .map(|c| c.to_vec())
    }

    pub fn id_path(&self, id: &SiteId) -> HierarchyResult<Vec<SiteId>> {
        self.data.read().unwrap().index.id_path(id)
    }

    pub fn path_string(&self, id: &SiteId) -> HierarchyResult<String> {
        self.data.read().unwrap().index.path_string(id)
    }

    pub fn len(&self) -> usize {
        self.data.read().unwrap().index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().unwrap().index.is_empty()
    }

    /// All registered site ids, in registration order.
    pub fn site_ids(&self) -> Vec<SiteId> {
        self.data
            .read()
            .unwrap()
            .index
            .iter_nodes()
            .map(|n| n.id.clone())
            .collect()
    }

    /// Export the resolved forest as `(id, parent, children)` records for
    /// the persistence layer, in registration order.
    pub fn snapshot(&self) -> ForestSnapshot {
        ForestSnapshot::from_index(&self.data.read().unwrap().index)
    }

    /// Forward the structural consistency check on the underlying index.
    pub fn verify(&self) -> HierarchyResult<()> {
        self.data.read().unwrap().index.verify_forest_matches_registry()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FacilityKind, Identity};

    fn facility(id: &str, hints: &[&str]) -> ObservingFacility {
        ObservingFacility::new(Identity::new(id, id), FacilityKind::Site)
            .with_sub_sites(hints.iter().copied())
    }

    #[test]
    fn add_facility_threads_hints_into_the_index() {
        let directory = SiteDirectory::new();
        directory.add_facility(facility("a", &[])).unwrap();
        directory.add_facility(facility("b", &["a"])).unwrap();

        assert_eq!(directory.roots(), vec![SiteId::from("b")]);
        assert_eq!(directory.parent(&SiteId::from("a")), Some(SiteId::from("b")));
        assert_eq!(directory.path_string(&SiteId::from("a")).unwrap(), "b/a");
        directory.verify().unwrap();
    }

    #[test]
    fn failed_insert_leaves_no_facility_record() {
        let directory = SiteDirectory::new();
        directory.add_facility(facility("a", &[])).unwrap();

        let err = directory.add_facility(facility("a", &["x"])).unwrap_err();
        assert_eq!(
            err,
            crate::hierarchy::HierarchyError::DuplicateInsert(SiteId::from("a"))
        );
        // The stored record is still the first one.
        assert!(directory.facility(&SiteId::from("a")).unwrap().hints().is_empty());
    }

    #[test]
    fn remove_facility_drops_record_and_node() {
        let directory = SiteDirectory::new();
        directory.add_facility(facility("a", &["b"])).unwrap();
        directory.add_facility(facility("b", &[])).unwrap();

        directory.remove_facility(&SiteId::from("a")).unwrap();
        assert!(!directory.contains(&SiteId::from("a")));
        assert!(directory.facility(&SiteId::from("a")).is_none());
        assert_eq!(directory.roots(), vec![SiteId::from("b")]);
        directory.verify().unwrap();
    }

    #[test]
    fn clones_share_state() {
        let directory = SiteDirectory::new();
        let other = directory.clone();
        directory.add_facility(facility("a", &[])).unwrap();

        assert!(other.contains(&SiteId::from("a")));
        assert_eq!(other.len(), 1);
    }

    #[test]
    fn snapshot_lists_sites_in_registration_order() {
        let directory = SiteDirectory::new();
        directory.add_facility(facility("z", &[])).unwrap();
        directory.add_facility(facility("a", &["z"])).unwrap();

        let snapshot = directory.snapshot();
        let order: Vec<&str> = snapshot.sites.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(order, vec!["z", "a"]);
        assert!(snapshot.verify_checksum());
    }
}
