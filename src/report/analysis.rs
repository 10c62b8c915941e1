//! Risk derivation and aggregation
//!
//! Pure functions over the session's risk records, shared by the
//! evaluator forms and every report view so the numbers always agree.

use rand::Rng;
use serde::Serialize;

use crate::entities::risk::{Risk, RiskBand};
use crate::entities::scenario::{OperationalScenario, StrategicScenario};

/// Per-band counts (or rounded percentages, see [`Distribution::percentages`])
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Distribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

impl Distribution {
    pub fn total(&self) -> usize {
        self.low + self.medium + self.high + self.critical
    }

    pub fn for_band(&self, band: RiskBand) -> usize {
        match band {
            RiskBand::Low => self.low,
            RiskBand::Medium => self.medium,
            RiskBand::High => self.high,
            RiskBand::Critical => self.critical,
        }
    }

    /// Express each count as a percentage of the total, rounded to the
    /// nearest integer independently. The rounded values are not
    /// guaranteed to sum to 100; that is accepted, not corrected.
    /// An empty distribution stays all-zero, no division takes place.
    pub fn percentages(&self) -> Distribution {
        let total = self.total();
        if total == 0 {
            return Distribution::default();
        }
        let pct = |count: usize| ((count as f64 / total as f64) * 100.0).round() as usize;
        Distribution {
            low: pct(self.low),
            medium: pct(self.medium),
            high: pct(self.high),
            critical: pct(self.critical),
        }
    }
}

/// Count risks per qualitative band on the 25 scale
pub fn distribution(risks: &[Risk]) -> Distribution {
    let mut dist = Distribution::default();
    for risk in risks {
        match risk.band() {
            RiskBand::Low => dist.low += 1,
            RiskBand::Medium => dist.medium += 1,
            RiskBand::High => dist.high += 1,
            RiskBand::Critical => dist.critical += 1,
        }
    }
    dist
}

/// Count operational scenarios per band on the 16 scale, for the
/// Workshop 4 synthesis view
pub fn operational_synthesis(scenarios: &[OperationalScenario]) -> Distribution {
    let mut dist = Distribution::default();
    for scenario in scenarios {
        match RiskBand::from_level16(scenario.level()) {
            RiskBand::Low => dist.low += 1,
            RiskBand::Medium => dist.medium += 1,
            RiskBand::High => dist.high += 1,
            RiskBand::Critical => dist.critical += 1,
        }
    }
    dist
}

/// The `limit` highest risks, descending by level. The sort is stable:
/// ties keep their original relative order.
pub fn top_risks(risks: &[Risk], limit: usize) -> Vec<&Risk> {
    let mut sorted: Vec<&Risk> = risks.iter().collect();
    sorted.sort_by(|a, b| b.level().cmp(&a.level()));
    sorted.truncate(limit);
    sorted
}

/// Simulated period-over-period movement of the average risk level
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Trend {
    pub current: f64,
    pub previous: f64,
    pub change_pct: f64,
}

/// Simulated trend of the average risk level.
///
/// There is no persisted history to compare against, so the "previous"
/// value is synthesized by perturbing the current average by up to ±10%.
/// The output is non-deterministic sample data, labeled as such in the
/// report, and must not be treated as a real historical comparison.
pub fn trend(risks: &[Risk]) -> Option<Trend> {
    if risks.is_empty() {
        return None;
    }
    let current =
        risks.iter().map(|r| r.level() as f64).sum::<f64>() / risks.len() as f64;
    let jitter: f64 = rand::rng().random();
    let previous = current * (1.0 + (jitter - 0.5) * 0.2);
    let change_pct = (current - previous) / previous * 100.0;
    Some(Trend {
        current,
        previous,
        change_pct,
    })
}

/// Maximum label length in the per-scenario series
pub const SERIES_LABEL_LEN: usize = 20;

/// One (probability, impact, level) triple per strategic scenario
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScenarioRiskPoint {
    pub scenario: String,
    pub probability: u8,
    pub impact: u8,
    pub level: u16,
}

/// Per-scenario risk triples for radar-style plotting.
///
/// Each scenario is paired with its first matching risk (a single risk
/// per scenario is assumed); scenarios without one emit zeros. Labels
/// are truncated to [`SERIES_LABEL_LEN`] characters.
pub fn scenario_risk_series(
    scenarios: &[StrategicScenario],
    risks: &[Risk],
) -> Vec<ScenarioRiskPoint> {
    scenarios
        .iter()
        .map(|scenario| {
            let risk = risks.iter().find(|r| r.scenario == scenario.id);
            ScenarioRiskPoint {
                scenario: scenario.name.chars().take(SERIES_LABEL_LEN).collect(),
                probability: risk.map(|r| r.probability).unwrap_or(0),
                impact: risk.map(|r| r.impact).unwrap_or(0),
                level: risk.map(|r| r.level()).unwrap_or(0),
            }
        })
        .collect()
}

/// Dense 5x5 histogram of risks by exact (impact, probability) pair.
/// Rows are impact 5 down to 1, columns probability 1 up to 5; all 25
/// cells are always present even when zero.
pub fn heatmap_grid(risks: &[Risk]) -> [[usize; 5]; 5] {
    let mut grid = [[0usize; 5]; 5];
    for (row, cells) in grid.iter_mut().enumerate() {
        let impact = (5 - row) as u8;
        for (col, cell) in cells.iter_mut().enumerate() {
            let probability = (col + 1) as u8;
            *cell = risks
                .iter()
                .filter(|r| r.impact == impact && r.probability == probability)
                .count();
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::{EntityId, EntityPrefix};
    use rand::Rng as _;

    fn risk(probability: u8, impact: u8) -> Risk {
        Risk::new(EntityId::new(EntityPrefix::Scen), probability, impact)
    }

    #[test]
    fn test_distribution_counts() {
        let risks = vec![risk(1, 1), risk(2, 5), risk(3, 5), risk(4, 5), risk(5, 5)];
        // Levels: 1 (low), 10 (medium), 15 (high), 20 (critical), 25 (critical)
        let dist = distribution(&risks);
        assert_eq!(dist.low, 1);
        assert_eq!(dist.medium, 1);
        assert_eq!(dist.high, 1);
        assert_eq!(dist.critical, 2);
        assert_eq!(dist.total(), 5);
    }

    #[test]
    fn test_distribution_empty_no_division() {
        let dist = distribution(&[]);
        assert_eq!(dist, Distribution::default());
        // Percentages of an empty distribution stay all-zero
        assert_eq!(dist.percentages(), Distribution::default());
    }

    #[test]
    fn test_percentages_round_independently() {
        // 3 risks across 3 bands: 33% each, sums to 99 - accepted
        let dist = Distribution {
            low: 1,
            medium: 1,
            high: 1,
            critical: 0,
        };
        let pct = dist.percentages();
        assert_eq!(pct.low, 33);
        assert_eq!(pct.medium, 33);
        assert_eq!(pct.high, 33);
        assert_eq!(pct.critical, 0);
    }

    #[test]
    fn test_single_critical_risk_is_100_pct() {
        let risks = vec![risk(4, 5)];
        let pct = distribution(&risks).percentages();
        assert_eq!(pct.critical, 100);
        assert_eq!(pct.low + pct.medium + pct.high, 0);
    }

    #[test]
    fn test_top_risks_stable_on_ties() {
        let a = risk(2, 5); // level 10
        let b = risk(5, 2); // level 10
        let c = risk(1, 5); // level 5
        let a_id = a.id.clone();
        let b_id = b.id.clone();
        let risks = vec![a, b, c];

        let top = top_risks(&risks, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].id, a_id);
        assert_eq!(top[1].id, b_id);
    }

    #[test]
    fn test_top_risks_idempotent_on_sorted_input() {
        let risks = vec![risk(5, 5), risk(3, 3), risk(1, 1)];
        let first: Vec<_> = top_risks(&risks, 3).iter().map(|r| r.id.clone()).collect();
        let second: Vec<_> = top_risks(&risks, 3).iter().map(|r| r.id.clone()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_top_risks_limit_exceeds_len() {
        let risks = vec![risk(1, 1)];
        assert_eq!(top_risks(&risks, 5).len(), 1);
    }

    #[test]
    fn test_trend_empty_is_none() {
        assert!(trend(&[]).is_none());
    }

    #[test]
    fn test_trend_stays_within_jitter_band() {
        let risks = vec![risk(4, 5), risk(2, 3)];
        let t = trend(&risks).unwrap();
        assert_eq!(t.current, 13.0);
        // previous = current * (1 + (r - 0.5) * 0.2) with r in [0, 1)
        assert!(t.previous >= 13.0 * 0.9 && t.previous < 13.0 * 1.1);
    }

    #[test]
    fn test_scenario_risk_series_pairs_and_truncates() {
        let mut scenario = StrategicScenario::new(
            "A scenario name well beyond twenty characters".to_string(),
            "description".to_string(),
        );
        scenario.sources.push(EntityId::new(EntityPrefix::Src));
        scenario.targeted_values.push(EntityId::new(EntityPrefix::Bv));
        let evaluated = Risk::new(scenario.id.clone(), 4, 5);

        let series = scenario_risk_series(&[scenario], &[evaluated]);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].scenario.chars().count(), 20);
        assert_eq!(series[0].probability, 4);
        assert_eq!(series[0].impact, 5);
        assert_eq!(series[0].level, 20);
    }

    #[test]
    fn test_scenario_without_risk_emits_zeros() {
        let mut scenario = StrategicScenario::new("Unevaluated".to_string(), "x".to_string());
        scenario.sources.push(EntityId::new(EntityPrefix::Src));
        scenario.targeted_values.push(EntityId::new(EntityPrefix::Bv));

        let series = scenario_risk_series(&[scenario], &[]);
        assert_eq!(series[0].probability, 0);
        assert_eq!(series[0].impact, 0);
        assert_eq!(series[0].level, 0);
    }

    #[test]
    fn test_heatmap_counts_sum_to_risk_count() {
        let mut risks = Vec::new();
        let mut rng = rand::rng();
        for _ in 0..40 {
            risks.push(risk(rng.random_range(1..=5), rng.random_range(1..=5)));
        }
        let grid = heatmap_grid(&risks);
        let total: usize = grid.iter().flatten().sum();
        assert_eq!(total, risks.len());
    }

    #[test]
    fn test_heatmap_orientation() {
        // Impact 5 lands in the first row, probability 1 in the first column
        let grid = heatmap_grid(&[risk(1, 5)]);
        assert_eq!(grid[0][0], 1);

        // Impact 1, probability 5 lands in the bottom-right cell
        let grid = heatmap_grid(&[risk(5, 1)]);
        assert_eq!(grid[4][4], 1);
    }

    #[test]
    fn test_heatmap_always_25_cells() {
        let grid = heatmap_grid(&[]);
        assert_eq!(grid.len(), 5);
        assert!(grid.iter().all(|row| row.len() == 5));
        assert_eq!(grid.iter().flatten().sum::<usize>(), 0);
    }

    #[test]
    fn test_operational_synthesis_uses_16_scale() {
        let mut ops = OperationalScenario::new(
            "x".to_string(),
            "y".to_string(),
            EntityId::new(EntityPrefix::Scen),
        );
        ops.probability = 3;
        ops.impact = 4;
        // Level 12 is critical on the 16 scale
        let dist = operational_synthesis(&[ops]);
        assert_eq!(dist.critical, 1);
        assert_eq!(dist.total(), 1);
    }
}
