//! Security criteria and security needs (Workshop 1)

use serde::{Deserialize, Serialize};

use crate::core::accumulator::{Validate, ValidationErrors};
use crate::core::entity::{Entity, Importance};
use crate::core::identity::{EntityId, EntityPrefix};

/// Classical security criterion family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum CriterionKind {
    #[default]
    Confidentiality,
    Integrity,
    Availability,
}

impl CriterionKind {
    pub fn all() -> &'static [CriterionKind] {
        &[
            CriterionKind::Confidentiality,
            CriterionKind::Integrity,
            CriterionKind::Availability,
        ]
    }
}

impl std::fmt::Display for CriterionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CriterionKind::Confidentiality => write!(f, "confidentiality"),
            CriterionKind::Integrity => write!(f, "integrity"),
            CriterionKind::Availability => write!(f, "availability"),
        }
    }
}

/// Textual description of what each rating level means for a criterion
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelScale {
    pub low: String,
    pub medium: String,
    pub high: String,
    pub critical: String,
}

/// A security criterion with its per-level rating scale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityCriterion {
    pub id: EntityId,

    pub name: String,

    pub description: String,

    #[serde(rename = "type")]
    pub kind: CriterionKind,

    #[serde(default)]
    pub scale: LevelScale,
}

impl SecurityCriterion {
    pub fn new(name: String, description: String, kind: CriterionKind) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Crit),
            name,
            description,
            kind,
            scale: LevelScale::default(),
        }
    }
}

impl Entity for SecurityCriterion {
    const PREFIX: &'static str = "CRIT";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Validate for SecurityCriterion {
    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.require_non_blank("name", &self.name);
        errors.require_non_blank("description", &self.description);
        errors
    }
}

/// Required security level for a business value under a criterion.
/// A many-to-many join with an annotation: both sides are referenced by
/// id, never owned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityNeed {
    pub id: EntityId,

    pub business_value: EntityId,

    pub criterion: EntityId,

    pub level: Importance,

    pub justification: String,
}

impl SecurityNeed {
    pub fn new(
        business_value: EntityId,
        criterion: EntityId,
        level: Importance,
        justification: String,
    ) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Need),
            business_value,
            criterion,
            level,
            justification,
        }
    }
}

impl Entity for SecurityNeed {
    const PREFIX: &'static str = "NEED";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.justification
    }
}

impl Validate for SecurityNeed {
    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.require_non_blank("justification", &self.justification);
        errors
    }
}
