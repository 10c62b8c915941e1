//! Risk sources, targeted objectives and source-objective pairs (Workshop 2)

use serde::{Deserialize, Serialize};

use crate::core::accumulator::{Validate, ValidationErrors};
use crate::core::entity::{Entity, Importance};
use crate::core::identity::{EntityId, EntityPrefix};

/// Risk source category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum SourceCategory {
    State,
    #[default]
    Organization,
    Individual,
    Environmental,
}

impl SourceCategory {
    pub fn all() -> &'static [SourceCategory] {
        &[
            SourceCategory::State,
            SourceCategory::Organization,
            SourceCategory::Individual,
            SourceCategory::Environmental,
        ]
    }
}

impl std::fmt::Display for SourceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceCategory::State => write!(f, "state"),
            SourceCategory::Organization => write!(f, "organization"),
            SourceCategory::Individual => write!(f, "individual"),
            SourceCategory::Environmental => write!(f, "environmental"),
        }
    }
}

/// Capability sub-scores, each rated 1-5
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    pub technical: u8,
    pub financial: u8,
    pub human: u8,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            technical: 1,
            financial: 1,
            human: 1,
        }
    }
}

/// Who or what could originate an attack on the assessed perimeter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskSource {
    pub id: EntityId,

    pub name: String,

    pub description: String,

    pub category: SourceCategory,

    /// What drives this source (filled during characterization)
    #[serde(default)]
    pub motivation: String,

    #[serde(default)]
    pub capabilities: Capabilities,

    /// Openings the source could exploit
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub opportunities: Vec<String>,
}

impl RiskSource {
    pub fn new(name: String, description: String, category: SourceCategory) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Src),
            name,
            description,
            category,
            motivation: String::new(),
            capabilities: Capabilities::default(),
            opportunities: Vec::new(),
        }
    }
}

impl Entity for RiskSource {
    const PREFIX: &'static str = "SRC";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Validate for RiskSource {
    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.require_non_blank("name", &self.name);
        errors.require_non_blank("description", &self.description);
        errors.require_in_scale("capabilities.technical", self.capabilities.technical, 1, 5);
        errors.require_in_scale("capabilities.financial", self.capabilities.financial, 1, 5);
        errors.require_in_scale("capabilities.human", self.capabilities.human, 1, 5);
        errors
    }
}

/// What a risk source wants to achieve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetedObjective {
    pub id: EntityId,

    pub name: String,

    pub description: String,

    /// Business impact if the objective is reached
    #[serde(default)]
    pub impact: Importance,

    #[serde(default)]
    pub motivation: String,
}

impl TargetedObjective {
    pub fn new(name: String, description: String, impact: Importance) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Obj),
            name,
            description,
            impact,
            motivation: String::new(),
        }
    }
}

impl Entity for TargetedObjective {
    const PREFIX: &'static str = "OBJ";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Validate for TargetedObjective {
    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.require_non_blank("name", &self.name);
        errors.require_non_blank("description", &self.description);
        errors
    }
}

/// A (source, objective) pairing rated for likelihood on the 1-4 scale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceObjectivePair {
    pub id: EntityId,

    pub source: EntityId,

    pub objective: EntityId,

    /// Likelihood 1-4
    pub likelihood: u8,

    pub justification: String,
}

impl SourceObjectivePair {
    pub fn new(source: EntityId, objective: EntityId, likelihood: u8, justification: String) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Pair),
            source,
            objective,
            likelihood,
            justification,
        }
    }
}

impl Entity for SourceObjectivePair {
    const PREFIX: &'static str = "PAIR";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.justification
    }
}

impl Validate for SourceObjectivePair {
    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.require_in_scale("likelihood", self.likelihood, 1, 4);
        errors.require_non_blank("justification", &self.justification);
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_source_creation() {
        let source = RiskSource::new(
            "Organized crime".to_string(),
            "Financially motivated intrusion groups".to_string(),
            SourceCategory::Organization,
        );
        assert!(source.id.to_string().starts_with("SRC-"));
        assert!(source.validate().is_empty());
    }

    #[test]
    fn test_capabilities_scale() {
        let mut source = RiskSource::new(
            "Insider".to_string(),
            "Disgruntled employee".to_string(),
            SourceCategory::Individual,
        );
        source.capabilities.technical = 6;
        assert!(source.validate().field("capabilities.technical").is_some());
    }

    #[test]
    fn test_pair_likelihood_scale() {
        let pair = SourceObjectivePair::new(
            EntityId::new(EntityPrefix::Src),
            EntityId::new(EntityPrefix::Obj),
            5,
            "well funded and motivated".to_string(),
        );
        assert!(pair.validate().field("likelihood").is_some());

        let pair = SourceObjectivePair::new(
            EntityId::new(EntityPrefix::Src),
            EntityId::new(EntityPrefix::Obj),
            3,
            "well funded and motivated".to_string(),
        );
        assert!(pair.validate().is_empty());
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let source = RiskSource::new(
            "Foreign state".to_string(),
            "Espionage capability".to_string(),
            SourceCategory::State,
        );
        let yaml = serde_yml::to_string(&source).unwrap();
        assert!(yaml.contains("category: state"));
    }
}
