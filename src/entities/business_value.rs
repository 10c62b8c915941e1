//! Business value entity (valeur métier)

use serde::{Deserialize, Serialize};

use crate::core::accumulator::{Validate, ValidationErrors};
use crate::core::entity::{Entity, Importance};
use crate::core::identity::{EntityId, EntityPrefix};

/// What the organization values and wants to protect. Created in
/// Workshop 1, referenced (never owned) by security needs, assets and
/// downstream scenarios.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessValue {
    pub id: EntityId,

    pub name: String,

    pub description: String,

    /// Stakeholders with an interest in this value
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stakeholders: Vec<EntityId>,

    /// Criticality for the organization
    #[serde(default)]
    pub importance: Importance,
}

impl BusinessValue {
    pub fn new(name: String, description: String, importance: Importance) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Bv),
            name,
            description,
            stakeholders: Vec::new(),
            importance,
        }
    }
}

impl Entity for BusinessValue {
    const PREFIX: &'static str = "BV";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Validate for BusinessValue {
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
    fn test_business_value_creation() {
        let bv = BusinessValue::new(
            "Customer orders".to_string(),
            "Order intake and fulfillment pipeline".to_string(),
            Importance::High,
        );
        assert!(bv.id.to_string().starts_with("BV-"));
        assert_eq!(bv.importance, Importance::High);
        assert!(bv.validate().is_empty());
    }

    #[test]
    fn test_business_value_requires_description() {
        let bv = BusinessValue::new("Orders".to_string(), "  ".to_string(), Importance::Medium);
        assert!(bv.validate().field("description").is_some());
    }

    #[test]
    fn test_business_value_yaml_roundtrip() {
        let bv = BusinessValue::new(
            "Billing".to_string(),
            "Invoicing and payment records".to_string(),
            Importance::Critical,
        );
        let yaml = serde_yml::to_string(&bv).unwrap();
        let parsed: BusinessValue = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(bv.id, parsed.id);
        assert_eq!(parsed.importance, Importance::Critical);
    }
}
