//! On-disk layout of a facility data store.

use std::path::{Path, PathBuf};

use crate::models::SiteId;

/// Configuration file name searched for by
/// [`DirectoryConfig::from_default_location`](crate::io::config::DirectoryConfig::from_default_location)
/// and placed at the store root.
pub const CONFIG_FILE_NAME: &str = "obsmeta.toml";

/// Directory holding one JSON document per facility.
pub const FACILITIES_DIR_NAME: &str = "facilities";

/// File holding the serialized forest snapshot.
pub const SNAPSHOT_FILE_NAME: &str = "forest.json";

/// Computes the paths of a facility data store rooted at one directory.
/// Pure path arithmetic; nothing here touches the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataStorePaths {
    root: PathBuf,
}

impl DataStorePaths {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE_NAME)
    }

    pub fn facilities_dir(&self) -> PathBuf {
        self.root.join(FACILITIES_DIR_NAME)
    }

    /// `<root>/facilities/<id>.json`. Ids are opaque keys chosen by data
    /// providers and are expected to be filesystem-safe (uuid-like).
    pub fn facility_file(&self, id: &SiteId) -> PathBuf {
        self.facilities_dir().join(format!("{}.json", id.as_str()))
    }

    pub fn snapshot_file(&self) -> PathBuf {
        self.root.join(SNAPSHOT_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_rooted_at_the_given_directory() {
        let paths = DataStorePaths::new("/var/lib/obsmeta");

        assert_eq!(paths.root(), Path::new("/var/lib/obsmeta"));
        assert_eq!(
            paths.config_file(),
            Path::new("/var/lib/obsmeta/obsmeta.toml")
        );
        assert_eq!(
            paths.facilities_dir(),
            Path::new("/var/lib/obsmeta/facilities")
        );
        assert_eq!(
            paths.snapshot_file(),
            Path::new("/var/lib/obsmeta/forest.json")
        );
    }

    #[test]
    fn facility_file_is_keyed_by_id() {
        let paths = DataStorePaths::new("store");
        let id = SiteId::from("8f4b-rozhen");

        assert_eq!(
            paths.facility_file(&id),
            Path::new("store/facilities/8f4b-rozhen.json")
        );
    }
}
