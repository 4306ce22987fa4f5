use serde::{Deserialize, Serialize};

use super::contact::{Address, AdminContact};

crate::define_string_id_type!(ManufacturerId);

/// Maker of instruments, mounts, enclosures and other facility hardware.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manufacturer {
    pub id: ManufacturerId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_contact: Option<AdminContact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

impl Manufacturer {
    pub fn new<I: Into<ManufacturerId>, N: Into<String>>(id: I, name: N) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: None,
            admin_contact: None,
            address: None,
        }
    }
}
