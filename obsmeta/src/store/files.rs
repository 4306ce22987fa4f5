//! File-backed store implementation.
//!
//! One JSON document per facility under `facilities/`, plus a
//! checksum-verified forest snapshot at the store root. The layout comes
//! from [`DataStorePaths`].

use async_trait::async_trait;
use std::fs;
use std::io::ErrorKind;

use super::error::{StoreError, StoreResult};
use super::repository::FacilityRepository;
use crate::directory::SiteDirectory;
use crate::io::config::DirectoryConfig;
use crate::io::json::{self, ForestSnapshot};
use crate::io::paths::DataStorePaths;
use crate::models::{ObservingFacility, SiteId};

/// Facility store rooted at a directory on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    paths: DataStorePaths,
    pretty: bool,
}

impl FileStore {
    pub fn new<P: Into<std::path::PathBuf>>(root: P) -> Self {
        Self {
            paths: DataStorePaths::new(root),
            pretty: true,
        }
    }

    pub fn from_config(config: &DirectoryConfig) -> Self {
        Self {
            paths: DataStorePaths::new(config.store.data_root.clone()),
            pretty: config.store.pretty_json,
        }
    }

    pub fn paths(&self) -> &DataStorePaths {
        &self.paths
    }

    /// Create the root and facilities directories if missing.
    pub fn ensure_layout(&self) -> StoreResult<()> {
        fs::create_dir_all(self.paths.facilities_dir())?;
        Ok(())
    }

    /// Rebuild a directory from disk by replaying the stored facility
    /// records in snapshot order. Resolution is deterministic, so the
    /// replayed forest must match the stored snapshot; a mismatch is
    /// reported as a checksum error.
    pub async fn rebuild_directory(&self) -> StoreResult<SiteDirectory> {
        let snapshot = self.load_snapshot().await?;
        let directory = SiteDirectory::new();

        for record in &snapshot.sites {
            let facility = self.get_facility(&record.id).await?;
            directory.add_facility(facility)?;
        }

        let rebuilt = directory.snapshot();
        if rebuilt.checksum != snapshot.checksum {
            return Err(StoreError::ChecksumMismatch {
                expected: snapshot.checksum,
                actual: rebuilt.checksum,
            });
        }
        log::info!(
            "rebuilt directory with {} sites from {}",
            snapshot.sites.len(),
            self.paths.root().display()
        );
        Ok(directory)
    }

    fn encode<T: serde::Serialize>(&self, value: &T) -> StoreResult<String> {
        let encoded = if self.pretty {
            json::to_json_string_pretty(value)
        } else {
            json::to_json_string(value)
        };
        encoded.map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn read_document(&self, path: &std::path::Path, what: &str) -> StoreResult<String> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StoreError::NotFound(what.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl FacilityRepository for FileStore {
    async fn health_check(&self) -> StoreResult<bool> {
        Ok(self.paths.facilities_dir().is_dir())
    }

    async fn store_facility(&self, facility: &ObservingFacility) -> StoreResult<()> {
        self.ensure_layout()?;
        let encoded = self.encode(facility)?;
        let path = self.paths.facility_file(facility.id());
        fs::write(&path, encoded)?;
        log::debug!("wrote facility {} to {}", facility.id(), path.display());
        Ok(())
    }

    async fn get_facility(&self, id: &SiteId) -> StoreResult<ObservingFacility> {
        let path = self.paths.facility_file(id);
        let content = self.read_document(&path, &format!("Facility {id} not found"))?;
        json::from_json_str(&content).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    async fn list_facilities(&self) -> StoreResult<Vec<SiteId>> {
        let dir = self.paths.facilities_dir();
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut ids = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(SiteId::from(stem));
            }
        }
        ids.sort();
        Ok(ids)
    }

    async fn delete_facility(&self, id: &SiteId) -> StoreResult<()> {
        let path = self.paths.facility_file(id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StoreError::NotFound(format!("Facility {id} not found")))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn store_snapshot(&self, snapshot: &ForestSnapshot) -> StoreResult<()> {
        fs::create_dir_all(self.paths.root())?;
        let encoded = self.encode(snapshot)?;
        fs::write(self.paths.snapshot_file(), encoded)?;
        Ok(())
    }

    async fn load_snapshot(&self) -> StoreResult<ForestSnapshot> {
        let content = self.read_document(&self.paths.snapshot_file(), "No snapshot stored")?;
        let snapshot: ForestSnapshot =
            json::from_json_str(&content).map_err(|e| StoreError::Serialization(e.to_string()))?;

        if !snapshot.verify_checksum() {
            let actual = ForestSnapshot::new(snapshot.sites.clone()).checksum;
            return Err(StoreError::ChecksumMismatch {
                expected: snapshot.checksum,
                actual,
            });
        }
        Ok(snapshot)
    }
}
