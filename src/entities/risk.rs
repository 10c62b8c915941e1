//! Evaluated risk record and qualitative banding

use serde::{Deserialize, Serialize};

use crate::core::accumulator::{Validate, ValidationErrors};
use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityPrefix};

/// Qualitative risk band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum RiskBand {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl RiskBand {
    /// Banding for the 1-25 scale (probability, impact in [1,5]),
    /// used by the risk evaluator and the report views
    pub fn from_level25(level: u16) -> Self {
        match level {
            0..=6 => RiskBand::Low,
            7..=12 => RiskBand::Medium,
            13..=18 => RiskBand::High,
            _ => RiskBand::Critical,
        }
    }

    /// Banding for the 1-16 scale (probability, impact in [1,4]),
    /// used by the Workshop 3/4 synthesis views. The thresholds differ
    /// from the 25 scale and the two functions are kept separate.
    pub fn from_level16(level: u16) -> Self {
        if level >= 12 {
            RiskBand::Critical
        } else if level >= 8 {
            RiskBand::High
        } else if level >= 4 {
            RiskBand::Medium
        } else {
            RiskBand::Low
        }
    }

    pub fn all() -> &'static [RiskBand] {
        &[
            RiskBand::Low,
            RiskBand::Medium,
            RiskBand::High,
            RiskBand::Critical,
        ]
    }

    /// Fixed French label used in report output
    pub fn label_fr(&self) -> &'static str {
        match self {
            RiskBand::Low => "Faible",
            RiskBand::Medium => "Moyen",
            RiskBand::High => "Élevé",
            RiskBand::Critical => "Critique",
        }
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskBand::Low => write!(f, "low"),
            RiskBand::Medium => write!(f, "medium"),
            RiskBand::High => write!(f, "high"),
            RiskBand::Critical => write!(f, "critical"),
        }
    }
}

/// Flattened scoring record attached to a strategic scenario.
///
/// The level is never stored: it is recomputed from the current
/// probability and impact on every read so displayed values can never
/// go stale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Risk {
    pub id: EntityId,

    /// Strategic scenario this evaluation belongs to
    pub scenario: EntityId,

    /// Probability 1-5
    pub probability: u8,

    /// Impact 1-5
    pub impact: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Risk {
    pub fn new(scenario: EntityId, probability: u8, impact: u8) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Risk),
            scenario,
            probability,
            impact,
            comment: None,
        }
    }

    /// Risk level = probability x impact, with both factors clamped
    /// defensively to the 1-5 scale before multiplying
    pub fn level(&self) -> u16 {
        let p = self.probability.clamp(1, 5) as u16;
        let i = self.impact.clamp(1, 5) as u16;
        p * i
    }

    /// Qualitative band of the current level on the 25 scale
    pub fn band(&self) -> RiskBand {
        RiskBand::from_level25(self.level())
    }
}

impl Entity for Risk {
    const PREFIX: &'static str = "RISK";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        self.comment.as_deref().unwrap_or("")
    }
}

impl Validate for Risk {
    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.require_in_scale("probability", self.probability, 1, 5);
        errors.require_in_scale("impact", self.impact, 1, 5);
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn risk(probability: u8, impact: u8) -> Risk {
        Risk::new(EntityId::new(EntityPrefix::Scen), probability, impact)
    }

    #[test]
    fn test_level_is_product() {
        for p in 1..=5u8 {
            for i in 1..=5u8 {
                assert_eq!(risk(p, i).level(), p as u16 * i as u16);
            }
        }
    }

    #[test]
    fn test_level_clamps_out_of_range() {
        assert_eq!(risk(0, 3).level(), 3);
        assert_eq!(risk(9, 9).level(), 25);
    }

    #[test]
    fn test_band25_thresholds() {
        assert_eq!(RiskBand::from_level25(1), RiskBand::Low);
        assert_eq!(RiskBand::from_level25(6), RiskBand::Low);
        assert_eq!(RiskBand::from_level25(7), RiskBand::Medium);
        assert_eq!(RiskBand::from_level25(12), RiskBand::Medium);
        assert_eq!(RiskBand::from_level25(13), RiskBand::High);
        assert_eq!(RiskBand::from_level25(18), RiskBand::High);
        assert_eq!(RiskBand::from_level25(19), RiskBand::Critical);
        assert_eq!(RiskBand::from_level25(25), RiskBand::Critical);
    }

    #[test]
    fn test_band16_thresholds() {
        assert_eq!(RiskBand::from_level16(3), RiskBand::Low);
        assert_eq!(RiskBand::from_level16(4), RiskBand::Medium);
        assert_eq!(RiskBand::from_level16(7), RiskBand::Medium);
        assert_eq!(RiskBand::from_level16(8), RiskBand::High);
        assert_eq!(RiskBand::from_level16(11), RiskBand::High);
        assert_eq!(RiskBand::from_level16(12), RiskBand::Critical);
        assert_eq!(RiskBand::from_level16(16), RiskBand::Critical);
    }

    #[test]
    fn test_band_scales_disagree() {
        // Level 12 is medium on the 25 scale but critical on the 16 scale;
        // the two banding functions must stay distinct.
        assert_eq!(RiskBand::from_level25(12), RiskBand::Medium);
        assert_eq!(RiskBand::from_level16(12), RiskBand::Critical);
    }

    #[test]
    fn test_validation_rejects_out_of_scale() {
        assert!(risk(0, 3).validate().field("probability").is_some());
        assert!(risk(3, 6).validate().field("impact").is_some());
        assert!(risk(4, 5).validate().is_empty());
    }

    #[test]
    fn test_evaluation_example() {
        let r = risk(4, 5);
        assert_eq!(r.level(), 20);
        assert_eq!(r.band(), RiskBand::Critical);
    }
}
