//! JSON encode/decode helpers and the forest snapshot format.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::hierarchy::HierarchyIndex;
use crate::models::SiteId;

/// Serialize any metadata value to compact JSON.
pub fn to_json_string<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).context("Failed to serialize value to JSON")
}

/// Serialize any metadata value to pretty-printed JSON, the format used for
/// on-disk documents.
pub fn to_json_string_pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize value to JSON")
}

/// Decode any metadata value from JSON. Decode failures report the path to
/// the offending field, not just the position in the byte stream.
pub fn from_json_str<T: DeserializeOwned>(json: &str) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| anyhow::anyhow!("Invalid JSON at `{}`: {}", e.path(), e.inner()))
}

/// One resolved site: the `(id, parent, children)` tuple the persistence
/// layer stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteRecord {
    pub id: SiteId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<SiteId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SiteId>,
}

/// Serialized form of a resolved forest.
///
/// `sites` is kept in registration order so that replaying the records
/// through a fresh index reproduces the identical forest. The checksum
/// covers the records only, not the timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForestSnapshot {
    pub generated_at: DateTime<Utc>,
    pub checksum: String,
    pub sites: Vec<SiteRecord>,
}

impl ForestSnapshot {
    pub fn new(sites: Vec<SiteRecord>) -> Self {
        let checksum = checksum_of(&sites);
        Self {
            generated_at: Utc::now(),
            checksum,
            sites,
        }
    }

    /// Export the current state of an index, in registration order.
    pub fn from_index(index: &HierarchyIndex) -> Self {
        let sites = index
            .iter_nodes()
            .map(|node| SiteRecord {
                id: node.id.clone(),
                parent: node.parent.clone(),
                children: node.children.clone(),
            })
            .collect();
        Self::new(sites)
    }

    /// Recompute the checksum and compare against the stored one.
    pub fn verify_checksum(&self) -> bool {
        checksum_of(&self.sites) == self.checksum
    }
}

/// Hex sha256 over a canonical line rendering of the records. The canonical
/// form is independent of JSON formatting, so re-encoding a snapshot does
/// not invalidate it.
fn checksum_of(sites: &[SiteRecord]) -> String {
    let mut hasher = Sha256::new();
    for record in sites {
        hasher.update(record.id.as_str().as_bytes());
        hasher.update(b"\t");
        if let Some(parent) = &record.parent {
            hasher.update(parent.as_str().as_bytes());
        }
        hasher.update(b"\t");
        for (i, child) in record.children.iter().enumerate() {
            if i > 0 {
                hasher.update(b",");
            }
            hasher.update(child.as_str().as_bytes());
        }
        hasher.update(b"\n");
    }
    hex::encode(hasher.finalize())
}
