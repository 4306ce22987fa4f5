use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

crate::define_string_id_type!(SiteId);

/// Lifecycle status of a metadata record.
///
/// `Deleted` records are kept so that external references to the id remain
/// resolvable; `Unknown` covers records imported from sources that do not
/// track a lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LifecycleStatus {
    Inactive,
    Active,
    Deleted,
    Suspended,
    Unknown,
}

/// Common identity block shared by every described entity.
///
/// Every facility, instrument and manufacturer record starts with one of
/// these. The `id` is the opaque key that all cross-references, including
/// the hierarchy index, use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: SiteId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    pub status: LifecycleStatus,
    pub last_update: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_references: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Identity {
    /// Create an active identity with the current timestamp.
    pub fn new<I: Into<SiteId>, N: Into<String>>(id: I, name: N) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            short_description: None,
            status: LifecycleStatus::Active,
            last_update: Utc::now(),
            external_references: Vec::new(),
            url: None,
        }
    }

    /// Refresh `last_update` after an edit.
    pub fn touch(&mut self) {
        self.last_update = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_roundtrips_through_json() {
        let identity = Identity::new("site-1", "Rozhen Observatory");
        let json = serde_json::to_string(&identity).unwrap();
        let back: Identity = serde_json::from_str(&json).unwrap();

        assert_eq!(back, identity);
        assert!(json.contains("\"lastUpdate\""));
        assert!(json.contains("\"active\""));
    }

    #[test]
    fn optional_fields_are_omitted() {
        let identity = Identity::new("site-2", "Backyard dome");
        let json = serde_json::to_string(&identity).unwrap();

        assert!(!json.contains("shortDescription"));
        assert!(!json.contains("externalReferences"));
        assert!(!json.contains("\"url\""));
    }

    #[test]
    fn site_id_is_opaque_and_displayable() {
        let id = SiteId::from("1b2c-3d4e");
        assert_eq!(id.as_str(), "1b2c-3d4e");
        assert_eq!(id.to_string(), "1b2c-3d4e");
        assert_eq!(SiteId::new("1b2c-3d4e"), id);
    }
}
