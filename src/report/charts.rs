//! Chart data contracts
//!
//! The core does no rendering. These are the fixed shapes handed to
//! whatever charting collaborator draws the pie, radar and heatmap
//! views; any renderer (or a plain JSON consumer) can take them as-is.

use serde::Serialize;

use crate::entities::risk::{Risk, RiskBand};
use crate::entities::scenario::StrategicScenario;
use crate::report::analysis::{self, ScenarioRiskPoint};

/// Fixed band colors (CSS RGB strings)
pub fn band_color(band: RiskBand) -> &'static str {
    match band {
        RiskBand::Low => "rgb(34, 197, 94)",
        RiskBand::Medium => "rgb(234, 179, 8)",
        RiskBand::High => "rgb(249, 115, 22)",
        RiskBand::Critical => "rgb(239, 68, 68)",
    }
}

/// One pie slice per band
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PieSlice {
    pub id: String,
    pub value: usize,
    pub color: &'static str,
}

/// Band distribution as pie slices, one per band in low-to-critical
/// order, zero-count bands included
pub fn distribution_pie(risks: &[Risk]) -> Vec<PieSlice> {
    let dist = analysis::distribution(risks);
    RiskBand::all()
        .iter()
        .map(|band| PieSlice {
            id: band.label_fr().to_string(),
            value: dist.for_band(*band),
            color: band_color(*band),
        })
        .collect()
}

/// Radar points keyed by the fields probability/impact/level
pub fn scenario_radar(scenarios: &[StrategicScenario], risks: &[Risk]) -> Vec<ScenarioRiskPoint> {
    analysis::scenario_risk_series(scenarios, risks)
}

/// A single heatmap cell: column label and count
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HeatmapCell {
    pub x: String,
    pub y: usize,
}

/// A heatmap row: impact label plus the five probability cells
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HeatmapRow {
    pub id: String,
    pub data: Vec<HeatmapCell>,
}

/// The dense 5x5 grid as labeled rows, impact 5 down to 1
pub fn heatmap_rows(risks: &[Risk]) -> Vec<HeatmapRow> {
    let grid = analysis::heatmap_grid(risks);
    grid.iter()
        .enumerate()
        .map(|(row, cells)| HeatmapRow {
            id: format!("{}", 5 - row),
            data: cells
                .iter()
                .enumerate()
                .map(|(col, count)| HeatmapCell {
                    x: format!("{}", col + 1),
                    y: *count,
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::{EntityId, EntityPrefix};

    fn risk(probability: u8, impact: u8) -> Risk {
        Risk::new(EntityId::new(EntityPrefix::Scen), probability, impact)
    }

    #[test]
    fn test_pie_has_all_four_slices() {
        let slices = distribution_pie(&[risk(4, 5)]);
        assert_eq!(slices.len(), 4);
        assert_eq!(slices[3].id, "Critique");
        assert_eq!(slices[3].value, 1);
        assert_eq!(slices[0].value, 0);
    }

    #[test]
    fn test_heatmap_rows_shape() {
        let rows = heatmap_rows(&[risk(2, 4), risk(2, 4)]);
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|r| r.data.len() == 5));
        assert_eq!(rows[0].id, "5");
        assert_eq!(rows[4].id, "1");
        // impact 4 is the second row, probability 2 the second column
        assert_eq!(rows[1].data[1].y, 2);
    }

    #[test]
    fn test_heatmap_rows_serialize_shape() {
        let json = serde_json::to_value(heatmap_rows(&[])).unwrap();
        let first = &json[0];
        assert_eq!(first["id"], "5");
        assert_eq!(first["data"][0]["x"], "1");
        assert_eq!(first["data"][0]["y"], 0);
    }
}
