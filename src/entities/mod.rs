//! Entity type definitions
//!
//! The session accumulates the following record types across the five
//! workshops:
//!
//! **Workshop 1 (socle de sécurité):**
//! - [`Scope`] - study perimeter with constraints and assumptions
//! - [`Stakeholder`] - interested parties and their needs
//! - [`BusinessValue`] - what the organization wants to protect
//! - [`SecurityCriterion`] / [`SecurityNeed`] - required security levels
//! - [`Asset`] - supporting assets (biens supports)
//!
//! **Workshop 2 (sources de risque):**
//! - [`RiskSource`] / [`TargetedObjective`] / [`SourceObjectivePair`]
//!
//! **Workshops 3-4 (scénarios):**
//! - [`StrategicScenario`] / [`OperationalScenario`] with embedded controls
//! - [`Threat`] - standalone threat catalog
//! - [`Risk`] - flattened scoring record feeding the report
//!
//! **Workshop 5 (traitement):**
//! - [`RiskTreatment`] with measures and residual risk
//! - [`MonitoringEntry`] - continuous improvement plan

pub mod asset;
pub mod business_value;
pub mod context;
pub mod risk;
pub mod risk_source;
pub mod scenario;
pub mod security;
pub mod threat;
pub mod treatment;

pub use asset::{Asset, AssetKind};
pub use business_value::BusinessValue;
pub use context::{Scope, Stakeholder};
pub use risk::{Risk, RiskBand};
pub use risk_source::{Capabilities, RiskSource, SourceCategory, SourceObjectivePair, TargetedObjective};
pub use scenario::{
    AttackMode, AttackModeKind, Control, ControlKind, OperatingMode, OperationalScenario,
    StrategicScenario,
};
pub use security::{CriterionKind, LevelScale, SecurityCriterion, SecurityNeed};
pub use threat::Threat;
pub use treatment::{Frequency, Measure, MeasureStatus, MonitoringEntry, ResidualRisk, RiskTreatment, TreatmentKind};
