//! Study scope and stakeholders (Workshop 1 framing)

use serde::{Deserialize, Serialize};

use crate::core::accumulator::{Validate, ValidationErrors};
use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityPrefix};

/// Minimum length of the scope description, matching the context-framing
/// presence check
pub const MIN_SCOPE_DESCRIPTION_LEN: usize = 20;

/// Perimeter of the study: free-text description plus constraint and
/// assumption lists. Created once in Workshop 1 and mutated by appending
/// or removing list entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scope {
    pub description: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assumptions: Vec<String>,
}

impl Validate for Scope {
    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if self.description.trim().len() < MIN_SCOPE_DESCRIPTION_LEN {
            errors.push(
                "description",
                format!(
                    "description must be at least {} characters",
                    MIN_SCOPE_DESCRIPTION_LEN
                ),
            );
        }
        errors
    }
}

/// A party with an interest in the assessed perimeter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stakeholder {
    pub id: EntityId,

    pub name: String,

    /// What this party needs from the organization
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub needs: Vec<String>,
}

impl Stakeholder {
    pub fn new(name: String) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Stk),
            name,
            needs: Vec::new(),
        }
    }
}

impl Entity for Stakeholder {
    const PREFIX: &'static str = "STK";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Validate for Stakeholder {
    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.require_non_blank("name", &self.name);
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_description_length() {
        let mut scope = Scope {
            description: "too short".to_string(),
            ..Default::default()
        };
        assert!(scope.validate().field("description").is_some());

        scope.description = "A production e-commerce platform and its data stores".to_string();
        assert!(scope.validate().is_empty());
    }

    #[test]
    fn test_scope_whitespace_not_counted() {
        let scope = Scope {
            description: "    padded    ".to_string(),
            ..Default::default()
        };
        assert!(!scope.validate().is_empty());
    }

    #[test]
    fn test_stakeholder_requires_name() {
        let stakeholder = Stakeholder::new(String::new());
        assert!(!stakeholder.validate().is_empty());
    }
}
