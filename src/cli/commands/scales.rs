//! `scales` command - show the rating scales and banding thresholds

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::entities::risk::RiskBand;

/// French labels for the 1-5 probability scale (final risk evaluation)
pub const PROBABILITY_LABELS: [&str; 5] = [
    "Très faible",
    "Faible",
    "Modérée",
    "Élevée",
    "Très élevée",
];

/// French labels for the 1-5 impact scale (final risk evaluation)
pub const IMPACT_LABELS: [&str; 5] = [
    "Négligeable",
    "Faible",
    "Modéré",
    "Important",
    "Critique",
];

/// French labels for the 1-4 likelihood scale (workshops 2 and 3)
pub const LIKELIHOOD_LABELS: [&str; 4] = [
    "Minime",
    "Significative",
    "Forte",
    "Quasi certaine",
];

/// French labels for the 1-4 severity scale (workshop 3)
pub const SEVERITY_LABELS: [&str; 4] = ["Mineure", "Significative", "Grave", "Critique"];

/// French labels for the 1-4 effectiveness scale (controls and measures)
pub const EFFECTIVENESS_LABELS: [&str; 4] = ["Faible", "Partielle", "Bonne", "Totale"];

#[derive(clap::Args)]
pub struct ScalesArgs {}

#[derive(Serialize)]
struct ScaleLevel {
    rating: u8,
    label: &'static str,
}

#[derive(Serialize)]
struct BandRange {
    band: &'static str,
    min: u16,
    max: u16,
}

#[derive(Serialize)]
struct ScalesData {
    probability: Vec<ScaleLevel>,
    impact: Vec<ScaleLevel>,
    likelihood: Vec<ScaleLevel>,
    severity: Vec<ScaleLevel>,
    bands_25: Vec<BandRange>,
    bands_16: Vec<BandRange>,
}

fn levels(labels: &[&'static str]) -> Vec<ScaleLevel> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| ScaleLevel {
            rating: (i + 1) as u8,
            label,
        })
        .collect()
}

fn build() -> ScalesData {
    ScalesData {
        probability: levels(&PROBABILITY_LABELS),
        impact: levels(&IMPACT_LABELS),
        likelihood: levels(&LIKELIHOOD_LABELS),
        severity: levels(&SEVERITY_LABELS),
        bands_25: vec![
            BandRange { band: "Faible", min: 1, max: 6 },
            BandRange { band: "Moyen", min: 7, max: 12 },
            BandRange { band: "Élevé", min: 13, max: 18 },
            BandRange { band: "Critique", min: 19, max: 25 },
        ],
        bands_16: vec![
            BandRange { band: "Faible", min: 1, max: 3 },
            BandRange { band: "Moyen", min: 4, max: 7 },
            BandRange { band: "Élevé", min: 8, max: 11 },
            BandRange { band: "Critique", min: 12, max: 16 },
        ],
    }
}

pub fn run(_args: ScalesArgs, global: &GlobalOpts) -> Result<()> {
    let data = build();

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&data).into_diagnostic()?
            );
            return Ok(());
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&data).into_diagnostic()?);
            return Ok(());
        }
        _ => {}
    }

    let columns = [ColumnDef::new("NOTE", 6), ColumnDef::new("LIBELLÉ", 24)];
    let formatter = TableFormatter::new(&columns);

    let scale_rows = |labels: &[&str]| -> Vec<TableRow> {
        labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                TableRow::new()
                    .cell(CellValue::Number((i + 1) as i64))
                    .cell(CellValue::Text(label.to_string()))
            })
            .collect()
    };

    println!("{}", style("Probabilité (1-5)").bold().underlined());
    formatter.output(&scale_rows(&PROBABILITY_LABELS), global.format);
    println!();

    println!("{}", style("Impact (1-5)").bold().underlined());
    formatter.output(&scale_rows(&IMPACT_LABELS), global.format);
    println!();

    println!("{}", style("Vraisemblance (1-4)").bold().underlined());
    formatter.output(&scale_rows(&LIKELIHOOD_LABELS), global.format);
    println!();

    println!("{}", style("Gravité (1-4)").bold().underlined());
    formatter.output(&scale_rows(&SEVERITY_LABELS), global.format);
    println!();

    let band_columns = [
        ColumnDef::new("NIVEAU", 12),
        ColumnDef::new("MIN", 5),
        ColumnDef::new("MAX", 5),
    ];
    let band_formatter = TableFormatter::new(&band_columns);
    let band_rows = |ranges: &[(RiskBand, u16, u16)]| -> Vec<TableRow> {
        ranges
            .iter()
            .map(|(band, min, max)| {
                TableRow::new()
                    .cell(CellValue::Band(*band))
                    .cell(CellValue::Number(*min as i64))
                    .cell(CellValue::Number(*max as i64))
            })
            .collect()
    };

    println!(
        "{}",
        style("Niveaux de risque (échelle 25, probabilité x impact)")
            .bold()
            .underlined()
    );
    band_formatter.output(
        &band_rows(&[
            (RiskBand::Low, 1, 6),
            (RiskBand::Medium, 7, 12),
            (RiskBand::High, 13, 18),
            (RiskBand::Critical, 19, 25),
        ]),
        global.format,
    );
    println!();

    println!(
        "{}",
        style("Niveaux opérationnels (échelle 16, vraisemblance x impact)")
            .bold()
            .underlined()
    );
    band_formatter.output(
        &band_rows(&[
            (RiskBand::Low, 1, 3),
            (RiskBand::Medium, 4, 7),
            (RiskBand::High, 8, 11),
            (RiskBand::Critical, 12, 16),
        ]),
        global.format,
    );

    Ok(())
}
