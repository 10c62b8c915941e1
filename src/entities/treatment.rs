//! Risk treatments, measures and the monitoring plan (Workshop 5)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::accumulator::{Validate, ValidationErrors};
use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityPrefix};
use crate::entities::scenario::ControlKind;

/// Treatment strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum TreatmentKind {
    #[default]
    Reduction,
    Sharing,
    Avoidance,
    Acceptance,
}

impl TreatmentKind {
    pub fn all() -> &'static [TreatmentKind] {
        &[
            TreatmentKind::Reduction,
            TreatmentKind::Sharing,
            TreatmentKind::Avoidance,
            TreatmentKind::Acceptance,
        ]
    }
}

impl std::fmt::Display for TreatmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreatmentKind::Reduction => write!(f, "reduction"),
            TreatmentKind::Sharing => write!(f, "sharing"),
            TreatmentKind::Avoidance => write!(f, "avoidance"),
            TreatmentKind::Acceptance => write!(f, "acceptance"),
        }
    }
}

/// Measure implementation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[derive(Default)]
pub enum MeasureStatus {
    #[default]
    Planned,
    InProgress,
    Completed,
}

impl MeasureStatus {
    pub fn all() -> &'static [MeasureStatus] {
        &[
            MeasureStatus::Planned,
            MeasureStatus::InProgress,
            MeasureStatus::Completed,
        ]
    }
}

impl std::fmt::Display for MeasureStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeasureStatus::Planned => write!(f, "planned"),
            MeasureStatus::InProgress => write!(f, "inProgress"),
            MeasureStatus::Completed => write!(f, "completed"),
        }
    }
}

/// A concrete security measure attached to a treatment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measure {
    pub id: EntityId,

    pub name: String,

    #[serde(rename = "type")]
    pub kind: ControlKind,

    /// Implementation cost (arbitrary currency unit)
    #[serde(default)]
    pub cost: f64,

    /// Effectiveness 1-4
    pub effectiveness: u8,

    pub deadline: NaiveDate,

    #[serde(default)]
    pub status: MeasureStatus,
}

impl Measure {
    pub fn new(name: String, kind: ControlKind, effectiveness: u8, deadline: NaiveDate) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Msr),
            name,
            kind,
            cost: 0.0,
            effectiveness,
            deadline,
            status: MeasureStatus::default(),
        }
    }
}

/// Risk remaining after the treatment's measures are applied,
/// tracked separately from the original scenario risk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResidualRisk {
    /// Probability 1-5
    pub probability: u8,

    /// Impact 1-5
    pub impact: u8,

    #[serde(default)]
    pub justification: String,
}

impl Default for ResidualRisk {
    fn default() -> Self {
        Self {
            probability: 1,
            impact: 1,
            justification: String::new(),
        }
    }
}

impl ResidualRisk {
    /// Residual level, recomputed from current ratings
    pub fn level(&self) -> u16 {
        let p = self.probability.clamp(1, 5) as u16;
        let i = self.impact.clamp(1, 5) as u16;
        p * i
    }
}

/// Treatment decision for a strategic scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskTreatment {
    pub id: EntityId,

    /// Strategic scenario being treated
    pub scenario: EntityId,

    #[serde(rename = "type")]
    pub kind: TreatmentKind,

    pub description: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub measures: Vec<Measure>,

    #[serde(default)]
    pub residual_risk: ResidualRisk,
}

impl RiskTreatment {
    pub fn new(scenario: EntityId, kind: TreatmentKind, description: String) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Trt),
            scenario,
            kind,
            description,
            measures: Vec::new(),
            residual_risk: ResidualRisk::default(),
        }
    }
}

impl Entity for RiskTreatment {
    const PREFIX: &'static str = "TRT";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.description
    }
}

impl Validate for RiskTreatment {
    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.require_non_blank("description", &self.description);
        errors.require_in_scale("residual_risk.probability", self.residual_risk.probability, 1, 5);
        errors.require_in_scale("residual_risk.impact", self.residual_risk.impact, 1, 5);
        errors
    }
}

/// Review cadence of a monitoring plan entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Frequency {
    Monthly,
    #[default]
    Quarterly,
    Biannual,
    Annual,
}

impl Frequency {
    pub fn all() -> &'static [Frequency] {
        &[
            Frequency::Monthly,
            Frequency::Quarterly,
            Frequency::Biannual,
            Frequency::Annual,
        ]
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Frequency::Monthly => write!(f, "monthly"),
            Frequency::Quarterly => write!(f, "quarterly"),
            Frequency::Biannual => write!(f, "biannual"),
            Frequency::Annual => write!(f, "annual"),
        }
    }
}

/// A continuous-monitoring commitment from the improvement plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringEntry {
    pub id: EntityId,

    pub name: String,

    #[serde(default)]
    pub frequency: Frequency,

    /// Indicators tracked by this entry
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indicators: Vec<String>,

    /// Parties receiving the review
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stakeholders: Vec<String>,
}

impl MonitoringEntry {
    pub fn new(name: String, frequency: Frequency) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Plan),
            name,
            frequency,
            indicators: Vec::new(),
            stakeholders: Vec::new(),
        }
    }
}

impl Entity for MonitoringEntry {
    const PREFIX: &'static str = "PLAN";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Validate for MonitoringEntry {
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
    fn test_treatment_creation() {
        let trt = RiskTreatment::new(
            EntityId::new(EntityPrefix::Scen),
            TreatmentKind::Reduction,
            "Harden the database tier".to_string(),
        );
        assert!(trt.id.to_string().starts_with("TRT-"));
        assert!(trt.validate().is_empty());
    }

    #[test]
    fn test_measure_status_serializes_camel_case() {
        let mut trt = RiskTreatment::new(
            EntityId::new(EntityPrefix::Scen),
            TreatmentKind::Reduction,
            "Patch cadence".to_string(),
        );
        let mut measure = Measure::new(
            "Monthly patching".to_string(),
            ControlKind::Preventive,
            3,
            NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
        );
        measure.status = MeasureStatus::InProgress;
        trt.measures.push(measure);

        let yaml = serde_yml::to_string(&trt).unwrap();
        assert!(yaml.contains("status: inProgress"));
    }

    #[test]
    fn test_residual_risk_level_recomputed() {
        let residual = ResidualRisk {
            probability: 2,
            impact: 3,
            justification: "after patching".to_string(),
        };
        assert_eq!(residual.level(), 6);
    }

    #[test]
    fn test_residual_risk_scale_checked() {
        let mut trt = RiskTreatment::new(
            EntityId::new(EntityPrefix::Scen),
            TreatmentKind::Acceptance,
            "Accept as-is".to_string(),
        );
        trt.residual_risk.probability = 7;
        assert!(trt.validate().field("residual_risk.probability").is_some());
    }

    #[test]
    fn test_monitoring_entry() {
        let entry = MonitoringEntry::new("Quarterly risk review".to_string(), Frequency::Quarterly);
        assert!(entry.validate().is_empty());
        let yaml = serde_yml::to_string(&entry).unwrap();
        assert!(yaml.contains("frequency: quarterly"));
    }
}
