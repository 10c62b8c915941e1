//! Threat catalog entry

use serde::{Deserialize, Serialize};

use crate::core::accumulator::{Validate, ValidationErrors};
use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityPrefix};

/// A standalone threat catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Threat {
    pub id: EntityId,

    pub name: String,

    pub description: String,
}

impl Threat {
    pub fn new(name: String, description: String) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Thrt),
            name,
            description,
        }
    }
}

impl Entity for Threat {
    const PREFIX: &'static str = "THRT";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Validate for Threat {
    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.require_non_blank("name", &self.name);
        errors.require_non_blank("description", &self.description);
        errors
    }
}
