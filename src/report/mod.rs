//! Report layer - aggregation, chart data contracts and export stubs

pub mod analysis;
pub mod charts;
pub mod export;

pub use analysis::{
    distribution, heatmap_grid, operational_synthesis, scenario_risk_series, top_risks, trend,
    Distribution, ScenarioRiskPoint, Trend,
};
pub use charts::{distribution_pie, heatmap_rows, scenario_radar, HeatmapCell, HeatmapRow, PieSlice};
pub use export::{ExportError, Exporter, NoopExporter};
