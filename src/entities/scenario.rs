//! Strategic and operational scenarios (Workshops 3 and 4)

use serde::{Deserialize, Serialize};

use crate::core::accumulator::{Validate, ValidationErrors};
use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityPrefix};

/// Security control family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum ControlKind {
    #[default]
    Preventive,
    Protective,
    Recovery,
}

impl ControlKind {
    pub fn all() -> &'static [ControlKind] {
        &[
            ControlKind::Preventive,
            ControlKind::Protective,
            ControlKind::Recovery,
        ]
    }
}

impl std::fmt::Display for ControlKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControlKind::Preventive => write!(f, "preventive"),
            ControlKind::Protective => write!(f, "protective"),
            ControlKind::Recovery => write!(f, "recovery"),
        }
    }
}

/// A security control embedded in a scenario, rated for effectiveness 1-4
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Control {
    pub id: EntityId,

    pub name: String,

    #[serde(rename = "type")]
    pub kind: ControlKind,

    /// Effectiveness 1-4
    pub effectiveness: u8,
}

impl Control {
    pub fn new(name: String, kind: ControlKind, effectiveness: u8) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Ctrl),
            name,
            kind,
            effectiveness,
        }
    }
}

/// How a strategic scenario unfolds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum OperatingMode {
    #[default]
    Direct,
    Indirect,
    Combined,
}

impl OperatingMode {
    pub fn all() -> &'static [OperatingMode] {
        &[
            OperatingMode::Direct,
            OperatingMode::Indirect,
            OperatingMode::Combined,
        ]
    }
}

impl std::fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperatingMode::Direct => write!(f, "direct"),
            OperatingMode::Indirect => write!(f, "indirect"),
            OperatingMode::Combined => write!(f, "combined"),
        }
    }
}

/// A high-level attack narrative linking risk sources to targeted
/// business values, rated for severity and likelihood on the 1-4 scale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategicScenario {
    pub id: EntityId,

    pub name: String,

    pub description: String,

    /// Originating risk sources (referenced by id)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<EntityId>,

    /// Business values under attack (referenced by id)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub targeted_values: Vec<EntityId>,

    #[serde(default)]
    pub mode: OperatingMode,

    /// Severity 1-4 (business impact)
    pub severity: u8,

    /// Likelihood 1-4
    pub likelihood: u8,

    #[serde(default)]
    pub justification: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub controls: Vec<Control>,
}

impl StrategicScenario {
    pub fn new(name: String, description: String) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Scen),
            name,
            description,
            sources: Vec::new(),
            targeted_values: Vec::new(),
            mode: OperatingMode::default(),
            severity: 1,
            likelihood: 1,
            justification: String::new(),
            controls: Vec::new(),
        }
    }
}

impl Entity for StrategicScenario {
    const PREFIX: &'static str = "SCEN";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Validate for StrategicScenario {
    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.require_non_blank("name", &self.name);
        errors.require_non_blank("description", &self.description);
        if self.sources.is_empty() {
            errors.push("sources", "at least one risk source is required");
        }
        if self.targeted_values.is_empty() {
            errors.push("targeted_values", "at least one targeted value is required");
        }
        errors.require_in_scale("severity", self.severity, 1, 4);
        errors.require_in_scale("likelihood", self.likelihood, 1, 4);
        errors
    }
}

/// Technical decomposition family of an operational scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum AttackModeKind {
    #[default]
    Technical,
    Physical,
    Organizational,
}

impl AttackModeKind {
    pub fn all() -> &'static [AttackModeKind] {
        &[
            AttackModeKind::Technical,
            AttackModeKind::Physical,
            AttackModeKind::Organizational,
        ]
    }
}

impl std::fmt::Display for AttackModeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttackModeKind::Technical => write!(f, "technical"),
            AttackModeKind::Physical => write!(f, "physical"),
            AttackModeKind::Organizational => write!(f, "organizational"),
        }
    }
}

/// Concrete attack mode of an operational scenario
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttackMode {
    #[serde(rename = "type")]
    pub kind: AttackModeKind,

    #[serde(default)]
    pub details: String,
}

/// A technical decomposition of a strategic scenario, rated for
/// probability and impact on the 1-4 scale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationalScenario {
    pub id: EntityId,

    pub name: String,

    pub description: String,

    /// Parent strategic scenario
    pub strategic_scenario: EntityId,

    #[serde(default)]
    pub mode: AttackMode,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub existing_controls: Vec<Control>,

    /// Probability 1-4 (technical likelihood)
    pub probability: u8,

    /// Impact 1-4
    pub impact: u8,

    #[serde(default)]
    pub justification: String,
}

impl OperationalScenario {
    pub fn new(name: String, description: String, strategic_scenario: EntityId) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Ops),
            name,
            description,
            strategic_scenario,
            mode: AttackMode::default(),
            existing_controls: Vec::new(),
            probability: 1,
            impact: 1,
            justification: String::new(),
        }
    }

    /// Raw 1-16 risk level, recomputed from current ratings
    pub fn level(&self) -> u16 {
        let p = self.probability.clamp(1, 4) as u16;
        let i = self.impact.clamp(1, 4) as u16;
        p * i
    }
}

impl Entity for OperationalScenario {
    const PREFIX: &'static str = "OPS";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Validate for OperationalScenario {
    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.require_non_blank("name", &self.name);
        errors.require_non_blank("description", &self.description);
        errors.require_in_scale("probability", self.probability, 1, 4);
        errors.require_in_scale("impact", self.impact, 1, 4);
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategic_scenario_requires_refs() {
        let scenario = StrategicScenario::new(
            "Data breach".to_string(),
            "Exfiltration of order records".to_string(),
        );
        let errors = scenario.validate();
        assert!(errors.field("sources").is_some());
        assert!(errors.field("targeted_values").is_some());
    }

    #[test]
    fn test_strategic_scenario_valid_with_refs() {
        let mut scenario = StrategicScenario::new(
            "Data breach".to_string(),
            "Exfiltration of order records".to_string(),
        );
        scenario.sources.push(EntityId::new(EntityPrefix::Src));
        scenario.targeted_values.push(EntityId::new(EntityPrefix::Bv));
        scenario.severity = 3;
        scenario.likelihood = 2;
        assert!(scenario.validate().is_empty());
    }

    #[test]
    fn test_strategic_scenario_scale_bounds() {
        let mut scenario = StrategicScenario::new("x".to_string(), "y".to_string());
        scenario.sources.push(EntityId::new(EntityPrefix::Src));
        scenario.targeted_values.push(EntityId::new(EntityPrefix::Bv));
        scenario.severity = 5;
        assert!(scenario.validate().field("severity").is_some());
    }

    #[test]
    fn test_operational_scenario_level() {
        let mut ops = OperationalScenario::new(
            "Pivot via VPN".to_string(),
            "Stolen credentials used on the VPN concentrator".to_string(),
            EntityId::new(EntityPrefix::Scen),
        );
        ops.probability = 3;
        ops.impact = 4;
        assert_eq!(ops.level(), 12);
    }

    #[test]
    fn test_operational_scenario_level_clamps() {
        let mut ops = OperationalScenario::new(
            "x".to_string(),
            "y".to_string(),
            EntityId::new(EntityPrefix::Scen),
        );
        ops.probability = 0;
        ops.impact = 9;
        // Out-of-range ratings are clamped to the 1-4 scale before multiplying
        assert_eq!(ops.level(), 4);
    }

    #[test]
    fn test_controls_edited_through_draft_persist() {
        use crate::core::accumulator::Accumulator;

        let mut scenario = StrategicScenario::new(
            "Data breach".to_string(),
            "Exfiltration of order records".to_string(),
        );
        scenario.sources.push(EntityId::new(EntityPrefix::Src));
        scenario.targeted_values.push(EntityId::new(EntityPrefix::Bv));
        scenario
            .controls
            .push(Control::new("Pare-feu".to_string(), ControlKind::Preventive, 2));

        let mut acc: Accumulator<StrategicScenario> = Accumulator::new();
        acc.add(scenario).unwrap();
        let id = acc.items()[0].id.clone();

        // The likelihood review lets the user drop and add controls on the draft
        let mut draft = acc.start_edit(&id).unwrap();
        draft.controls.remove(0);
        draft
            .controls
            .push(Control::new("Supervision".to_string(), ControlKind::Recovery, 3));
        draft.likelihood = 2;
        acc.save_draft(draft).unwrap();

        let saved = acc.get(&id).unwrap();
        assert_eq!(saved.controls.len(), 1);
        assert_eq!(saved.controls[0].name, "Supervision");
        assert_eq!(saved.controls[0].kind, ControlKind::Recovery);
    }

    #[test]
    fn test_control_embedded_roundtrip() {
        let mut scenario = StrategicScenario::new(
            "Supply chain".to_string(),
            "Compromised dependency".to_string(),
        );
        scenario.sources.push(EntityId::new(EntityPrefix::Src));
        scenario.targeted_values.push(EntityId::new(EntityPrefix::Bv));
        scenario
            .controls
            .push(Control::new("Code review".to_string(), ControlKind::Preventive, 3));

        let yaml = serde_yml::to_string(&scenario).unwrap();
        let parsed: StrategicScenario = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(parsed.controls.len(), 1);
        assert_eq!(parsed.controls[0].kind, ControlKind::Preventive);
    }
}
