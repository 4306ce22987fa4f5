use serde::{Deserialize, Serialize};

use super::identity::{Identity, SiteId};

crate::define_string_id_type!(DeviceId);

/// Concrete kind of an observing facility.
///
/// The metadata standard describes facility behaviour through a common
/// interface; this enum is the closed set of concrete kinds that interface
/// covers, each carrying the same [`SiteId`] the hierarchy index uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FacilityKind {
    Site,
    MobilePlatform,
    Collaboration,
    Network,
    Array,
}

/// Geographic location of a facility.
///
/// Longitudes are measured eastward, so western sites carry negative values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub east_longitude_deg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude_deg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude_m: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_name: Option<String>,
}

/// Legal relationship between an owner and a facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OwnershipKind {
    University,
    Research,
    Commercial,
    School,
    Network,
    Government,
    Private,
    Club,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityOwner {
    pub name: String,
    pub kind: OwnershipKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Reference to an image of the facility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSource {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessibility_description: Option<String>,
}

/// Full description of an observing facility.
///
/// `assumed_sub_site_ids` is the author's locally-declared guess at which
/// other sites are, or will become, descendants of this one. The hierarchy
/// index consumes that hint set; a site is never told its parent directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservingFacility {
    pub identity: Identity,
    pub kind: FacilityKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assumed_sub_site_ids: Vec<SiteId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub device_ids: Vec<DeviceId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub owners: Vec<FacilityOwner>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ImageSource>,
}

impl ObservingFacility {
    pub fn new(identity: Identity, kind: FacilityKind) -> Self {
        Self {
            identity,
            kind,
            location: None,
            assumed_sub_site_ids: Vec::new(),
            device_ids: Vec::new(),
            owners: Vec::new(),
            images: Vec::new(),
        }
    }

    pub fn id(&self) -> &SiteId {
        &self.identity.id
    }

    /// The hint set handed to the hierarchy index on insertion.
    pub fn hints(&self) -> &[SiteId] {
        &self.assumed_sub_site_ids
    }

    pub fn with_sub_sites<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<SiteId>,
    {
        self.assumed_sub_site_ids = ids.into_iter().map(Into::into).collect();
        self
    }
}
