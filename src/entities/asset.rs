//! Supporting asset entity (bien support)

use serde::{Deserialize, Serialize};

use crate::core::accumulator::{Validate, ValidationErrors};
use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityPrefix};

/// Asset family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum AssetKind {
    #[default]
    Hardware,
    Software,
    Network,
    Personnel,
    Site,
    Organization,
}

impl AssetKind {
    pub fn all() -> &'static [AssetKind] {
        &[
            AssetKind::Hardware,
            AssetKind::Software,
            AssetKind::Network,
            AssetKind::Personnel,
            AssetKind::Site,
            AssetKind::Organization,
        ]
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetKind::Hardware => write!(f, "hardware"),
            AssetKind::Software => write!(f, "software"),
            AssetKind::Network => write!(f, "network"),
            AssetKind::Personnel => write!(f, "personnel"),
            AssetKind::Site => write!(f, "site"),
            AssetKind::Organization => write!(f, "organization"),
        }
    }
}

/// A supporting asset on which business values rest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: EntityId,

    pub name: String,

    pub description: String,

    #[serde(rename = "type")]
    pub kind: AssetKind,

    /// Business values this asset supports (referenced by id)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub business_values: Vec<EntityId>,
}

impl Asset {
    pub fn new(name: String, description: String, kind: AssetKind) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Asset),
            name,
            description,
            kind,
            business_values: Vec::new(),
        }
    }
}

impl Entity for Asset {
    const PREFIX: &'static str = "ASSET";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Validate for Asset {
    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.require_non_blank("name", &self.name);
        errors.require_non_blank("description", &self.description);
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_creation() {
        let asset = Asset::new(
            "DB Server".to_string(),
            "prod database".to_string(),
            AssetKind::Hardware,
        );
        assert!(asset.id.to_string().starts_with("ASSET-"));
        assert!(asset.validate().is_empty());
    }

    #[test]
    fn test_asset_requires_name_and_description() {
        let asset = Asset::new(String::new(), String::new(), AssetKind::Software);
        let errors = asset.validate();
        assert!(errors.field("name").is_some());
        assert!(errors.field("description").is_some());
    }

    #[test]
    fn test_asset_kind_serializes_lowercase() {
        let asset = Asset::new("LAN".to_string(), "office network".to_string(), AssetKind::Network);
        let yaml = serde_yml::to_string(&asset).unwrap();
        assert!(yaml.contains("type: network"));
    }
}
