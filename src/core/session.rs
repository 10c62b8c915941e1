//! In-memory session aggregate
//!
//! A session holds everything accumulated across the five workshops.
//! Data flows strictly forward: Workshop 1's business values become
//! selectable references in Workshop 3's scenarios, Workshop 3's
//! scenarios feed Workshop 4's decomposition, and Workshop 5 treats the
//! Workshop 3/4 output. Nothing is persisted; the session lives for one
//! run of the tool.

use serde::Serialize;

use crate::core::accumulator::Accumulator;
use crate::core::identity::EntityId;
use crate::core::workshop::WorkshopProgress;
use crate::entities::{
    Asset, BusinessValue, MonitoringEntry, OperationalScenario, Risk, RiskSource, RiskTreatment,
    Scope, SecurityCriterion, SecurityNeed, SourceObjectivePair, Stakeholder, StrategicScenario,
    TargetedObjective, Threat,
};

/// Fallback labels for dangling references. Removal never cascades, so a
/// reference can outlive its record; the report renders these instead of
/// failing.
pub const UNKNOWN_BUSINESS_VALUE: &str = "unknown business value";
pub const UNKNOWN_SOURCE: &str = "unknown risk source";
pub const UNKNOWN_OBJECTIVE: &str = "unknown objective";
pub const UNKNOWN_SCENARIO: &str = "unknown scenario";
pub const UNKNOWN_CRITERION: &str = "unknown criterion";
pub const UNKNOWN_STAKEHOLDER: &str = "unknown stakeholder";

/// Everything a single analyst accumulates during one assessment run
#[derive(Debug, Clone, Default, Serialize)]
pub struct Session {
    pub progress: WorkshopProgress,

    pub scope: Scope,
    pub stakeholders: Accumulator<Stakeholder>,
    pub business_values: Accumulator<BusinessValue>,
    pub security_criteria: Accumulator<SecurityCriterion>,
    pub security_needs: Accumulator<SecurityNeed>,
    pub assets: Accumulator<Asset>,
    pub threats: Accumulator<Threat>,

    pub risk_sources: Accumulator<RiskSource>,
    pub objectives: Accumulator<TargetedObjective>,
    pub pairs: Accumulator<SourceObjectivePair>,

    pub strategic_scenarios: Accumulator<StrategicScenario>,
    pub operational_scenarios: Accumulator<OperationalScenario>,
    pub risks: Accumulator<Risk>,

    pub treatments: Accumulator<RiskTreatment>,
    pub monitoring_plan: Accumulator<MonitoringEntry>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn business_value_name(&self, id: &EntityId) -> &str {
        self.business_values
            .get(id)
            .map(|bv| bv.name.as_str())
            .unwrap_or(UNKNOWN_BUSINESS_VALUE)
    }

    pub fn source_name(&self, id: &EntityId) -> &str {
        self.risk_sources
            .get(id)
            .map(|s| s.name.as_str())
            .unwrap_or(UNKNOWN_SOURCE)
    }

    pub fn objective_name(&self, id: &EntityId) -> &str {
        self.objectives
            .get(id)
            .map(|o| o.name.as_str())
            .unwrap_or(UNKNOWN_OBJECTIVE)
    }

    pub fn scenario_name(&self, id: &EntityId) -> &str {
        self.strategic_scenarios
            .get(id)
            .map(|s| s.name.as_str())
            .unwrap_or(UNKNOWN_SCENARIO)
    }

    pub fn criterion_name(&self, id: &EntityId) -> &str {
        self.security_criteria
            .get(id)
            .map(|c| c.name.as_str())
            .unwrap_or(UNKNOWN_CRITERION)
    }

    pub fn stakeholder_name(&self, id: &EntityId) -> &str {
        self.stakeholders
            .get(id)
            .map(|s| s.name.as_str())
            .unwrap_or(UNKNOWN_STAKEHOLDER)
    }

    /// First risk evaluated for a strategic scenario. Several views assume
    /// a single risk per scenario; only the first match is surfaced.
    pub fn risk_for_scenario(&self, scenario_id: &EntityId) -> Option<&Risk> {
        self.risks
            .items()
            .iter()
            .find(|r| &r.scenario == scenario_id)
    }

    /// Strategic scenarios without a risk evaluation yet. The Workshop 4
    /// synthesis step requires this to be empty before final submit.
    pub fn unevaluated_scenarios(&self) -> Vec<&StrategicScenario> {
        self.strategic_scenarios
            .items()
            .iter()
            .filter(|s| self.risk_for_scenario(&s.id).is_none())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dangling_reference_falls_back() {
        let session = Session::new();
        let missing = EntityId::new(crate::core::identity::EntityPrefix::Bv);
        assert_eq!(session.business_value_name(&missing), UNKNOWN_BUSINESS_VALUE);
        assert_eq!(
            session.stakeholder_name(&EntityId::new(crate::core::identity::EntityPrefix::Stk)),
            UNKNOWN_STAKEHOLDER
        );
    }

    #[test]
    fn test_lookup_resolves_after_add() {
        let mut session = Session::new();
        session
            .stakeholders
            .add(Stakeholder::new("Direction générale".to_string()))
            .unwrap();
        let id = session.stakeholders.items()[0].id.clone();
        assert_eq!(session.stakeholder_name(&id), "Direction générale");

        // Removing the record leaves the id dangling, resolved by fallback
        session.stakeholders.remove(&id);
        assert_eq!(session.stakeholder_name(&id), UNKNOWN_STAKEHOLDER);
    }

    #[test]
    fn test_single_risk_per_scenario_surfaced() {
        let mut session = Session::new();
        let mut scenario = StrategicScenario::new(
            "Data breach".to_string(),
            "Exfiltration of order records".to_string(),
        );
        scenario
            .sources
            .push(EntityId::new(crate::core::identity::EntityPrefix::Src));
        scenario
            .targeted_values
            .push(EntityId::new(crate::core::identity::EntityPrefix::Bv));
        let scenario_id = scenario.id.clone();
        session.strategic_scenarios.add(scenario).unwrap();

        assert_eq!(session.unevaluated_scenarios().len(), 1);

        session.risks.add(Risk::new(scenario_id.clone(), 4, 5)).unwrap();
        let second = Risk::new(scenario_id.clone(), 1, 1);
        session.risks.add(second).unwrap();

        // Only the first match is surfaced
        let surfaced = session.risk_for_scenario(&scenario_id).unwrap();
        assert_eq!(surfaced.level(), 20);
        assert!(session.unevaluated_scenarios().is_empty());
    }
}
