use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Postal address of a facility or organisation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attention_line: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub street_lines: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_or_province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// ISO 3166-1 alpha-2 country code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub po_box: Option<String>,
}

impl Address {
    /// Render the address as display lines, skipping empty components.
    pub fn display_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(attention) = &self.attention_line {
            lines.push(attention.clone());
        }
        lines.extend(self.street_lines.iter().cloned());
        if let Some(po_box) = &self.po_box {
            lines.push(format!("P.O. Box {po_box}"));
        }

        let mut locality = String::new();
        if let Some(city) = &self.city {
            locality.push_str(city);
        }
        if let Some(state) = &self.state_or_province {
            if !locality.is_empty() {
                locality.push_str(", ");
            }
            locality.push_str(state);
        }
        if let Some(postal) = &self.postal_code {
            if !locality.is_empty() {
                locality.push(' ');
            }
            locality.push_str(postal);
        }
        if !locality.is_empty() {
            lines.push(locality);
        }
        if let Some(country) = &self.country_id {
            lines.push(country.clone());
        }
        lines
    }
}

/// Administrative contact for a facility, owner or manufacturer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminContact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Channel name (e.g. "matrix", "fediverse") to handle.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub additional_communication: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl AdminContact {
    pub fn new<E: Into<String>>(email: E) -> Self {
        Self {
            name: None,
            email: email.into(),
            phone: None,
            additional_communication: BTreeMap::new(),
            note: None,
        }
    }

    /// `Name <email>` if a name is present, bare email otherwise.
    pub fn email_display(&self) -> String {
        match &self.name {
            Some(name) => format!("{} <{}>", name, self.email),
            None => self.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_display_lines_skip_missing_parts() {
        let address = Address {
            street_lines: vec!["1 Observatory Rd".to_string()],
            city: Some("La Serena".to_string()),
            country_id: Some("CL".to_string()),
            ..Default::default()
        };

        assert_eq!(
            address.display_lines(),
            vec!["1 Observatory Rd", "La Serena", "CL"]
        );
    }

    #[test]
    fn address_locality_combines_city_state_postal() {
        let address = Address {
            city: Some("Tucson".to_string()),
            state_or_province: Some("AZ".to_string()),
            postal_code: Some("85719".to_string()),
            country_id: Some("US".to_string()),
            ..Default::default()
        };

        assert_eq!(address.display_lines(), vec!["Tucson, AZ 85719", "US"]);
    }

    #[test]
    fn contact_email_display() {
        let mut contact = AdminContact::new("ops@example.org");
        assert_eq!(contact.email_display(), "ops@example.org");

        contact.name = Some("Site Ops".to_string());
        assert_eq!(contact.email_display(), "Site Ops <ops@example.org>");
    }
}
