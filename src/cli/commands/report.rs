//! Final assessment report
//!
//! Builds one serializable view of the whole session, then renders it
//! as styled text, Markdown, JSON or YAML.

use chrono::{DateTime, Utc};
use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::session::Session;
use crate::entities::risk::RiskBand;
use crate::entities::Scope;
use crate::report::{self, Distribution, HeatmapRow, PieSlice, ScenarioRiskPoint, Trend};

/// How many entries the top-risk list carries
pub const TOP_RISK_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct TopRiskEntry {
    pub scenario: String,
    pub probability: u8,
    pub impact: u8,
    pub level: u16,
    pub band: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TreatmentSummary {
    pub scenario: String,
    pub kind: String,
    pub measures: usize,
    pub residual_level: u16,
    pub residual_band: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonitoringSummary {
    pub name: String,
    pub frequency: String,
    pub indicators: Vec<String>,
}

/// Workshop 1 baseline, with references resolved to display names
#[derive(Debug, Clone, Serialize)]
pub struct BusinessValueSummary {
    pub name: String,
    pub importance: String,
    pub stakeholders: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssetSummary {
    pub name: String,
    pub kind: String,
    pub business_values: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThreatSummary {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Counts {
    pub stakeholders: usize,
    pub business_values: usize,
    pub assets: usize,
    pub risk_sources: usize,
    pub strategic_scenarios: usize,
    pub operational_scenarios: usize,
    pub risks: usize,
    pub treatments: usize,
}

/// The whole report as one serializable value
#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    pub generated_at: DateTime<Utc>,
    pub scope: Scope,
    pub counts: Counts,
    pub business_values: Vec<BusinessValueSummary>,
    pub assets: Vec<AssetSummary>,
    pub threats: Vec<ThreatSummary>,
    pub distribution: Distribution,
    pub percentages: Distribution,
    pub operational_synthesis: Distribution,
    pub pie: Vec<PieSlice>,
    pub radar: Vec<ScenarioRiskPoint>,
    pub heatmap: Vec<HeatmapRow>,
    pub top_risks: Vec<TopRiskEntry>,
    /// Simulated, not historical; None when no risk was evaluated
    pub trend: Option<Trend>,
    pub treatments: Vec<TreatmentSummary>,
    pub monitoring: Vec<MonitoringSummary>,
}

pub fn build(session: &Session) -> ReportData {
    let risks = session.risks.items();
    let scenarios = session.strategic_scenarios.items();
    let dist = report::distribution(risks);

    ReportData {
        generated_at: Utc::now(),
        scope: session.scope.clone(),
        counts: Counts {
            stakeholders: session.stakeholders.len(),
            business_values: session.business_values.len(),
            assets: session.assets.len(),
            risk_sources: session.risk_sources.len(),
            strategic_scenarios: scenarios.len(),
            operational_scenarios: session.operational_scenarios.len(),
            risks: risks.len(),
            treatments: session.treatments.len(),
        },
        business_values: session
            .business_values
            .items()
            .iter()
            .map(|bv| BusinessValueSummary {
                name: bv.name.clone(),
                importance: bv.importance.to_string(),
                stakeholders: bv
                    .stakeholders
                    .iter()
                    .map(|id| session.stakeholder_name(id).to_string())
                    .collect(),
            })
            .collect(),
        assets: session
            .assets
            .items()
            .iter()
            .map(|a| AssetSummary {
                name: a.name.clone(),
                kind: a.kind.to_string(),
                business_values: a
                    .business_values
                    .iter()
                    .map(|id| session.business_value_name(id).to_string())
                    .collect(),
            })
            .collect(),
        threats: session
            .threats
            .items()
            .iter()
            .map(|t| ThreatSummary {
                name: t.name.clone(),
                description: t.description.clone(),
            })
            .collect(),
        distribution: dist,
        percentages: dist.percentages(),
        operational_synthesis: report::operational_synthesis(
            session.operational_scenarios.items(),
        ),
        pie: report::distribution_pie(risks),
        radar: report::scenario_radar(scenarios, risks),
        heatmap: report::heatmap_rows(risks),
        top_risks: report::top_risks(risks, TOP_RISK_LIMIT)
            .into_iter()
            .map(|risk| TopRiskEntry {
                scenario: session.scenario_name(&risk.scenario).to_string(),
                probability: risk.probability,
                impact: risk.impact,
                level: risk.level(),
                band: risk.band().label_fr().to_string(),
            })
            .collect(),
        trend: report::trend(risks),
        treatments: session
            .treatments
            .items()
            .iter()
            .map(|t| TreatmentSummary {
                scenario: session.scenario_name(&t.scenario).to_string(),
                kind: t.kind.to_string(),
                measures: t.measures.len(),
                residual_level: t.residual_risk.level(),
                residual_band: RiskBand::from_level25(t.residual_risk.level())
                    .label_fr()
                    .to_string(),
            })
            .collect(),
        monitoring: session
            .monitoring_plan
            .items()
            .iter()
            .map(|e| MonitoringSummary {
                name: e.name.clone(),
                frequency: e.frequency.to_string(),
                indicators: e.indicators.clone(),
            })
            .collect(),
    }
}

pub fn render(session: &Session, global: &GlobalOpts) -> Result<()> {
    let data = build(session);
    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&data).into_diagnostic()?);
            Ok(())
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&data).into_diagnostic()?);
            Ok(())
        }
        OutputFormat::Md => {
            render_md(&data);
            Ok(())
        }
        OutputFormat::Auto | OutputFormat::Text => {
            render_text(&data, global);
            Ok(())
        }
    }
}

fn render_text(data: &ReportData, global: &GlobalOpts) {
    println!();
    println!("{}", style("Rapport d'analyse de risques").bold().cyan());
    println!("{}", "=".repeat(40));

    println!();
    println!("{}", style("Périmètre").bold().underlined());
    println!("  {}", data.scope.description);
    if !global.quiet {
        for constraint in &data.scope.constraints {
            println!("  contrainte: {}", constraint);
        }
        for assumption in &data.scope.assumptions {
            println!("  hypothèse: {}", assumption);
        }
    }

    println!();
    println!("{}", style("Synthèse").bold().underlined());
    println!(
        "  {} valeurs métier, {} biens supports, {} sources de risque",
        data.counts.business_values, data.counts.assets, data.counts.risk_sources
    );
    println!(
        "  {} scénarios stratégiques, {} scénarios opérationnels, {} risques évalués",
        data.counts.strategic_scenarios, data.counts.operational_scenarios, data.counts.risks
    );

    if !global.quiet {
        println!();
        println!("{}", style("Socle de sécurité").bold().underlined());
        for bv in &data.business_values {
            if bv.stakeholders.is_empty() {
                println!("  valeur métier: {} ({})", bv.name, bv.importance);
            } else {
                println!(
                    "  valeur métier: {} ({}), parties prenantes: {}",
                    bv.name,
                    bv.importance,
                    bv.stakeholders.join(", ")
                );
            }
        }
        for asset in &data.assets {
            if asset.business_values.is_empty() {
                println!("  bien support: {} ({})", asset.name, asset.kind);
            } else {
                println!(
                    "  bien support: {} ({}), soutient: {}",
                    asset.name,
                    asset.kind,
                    asset.business_values.join(", ")
                );
            }
        }
        for threat in &data.threats {
            println!("  menace: {}", threat.name);
        }
    }

    println!();
    println!("{}", style("Répartition des risques").bold().underlined());
    let dist_columns = [
        ColumnDef::new("NIVEAU", 12),
        ColumnDef::new("NOMBRE", 8),
        ColumnDef::new("PART", 6),
    ];
    let rows: Vec<TableRow> = RiskBand::all()
        .iter()
        .map(|band| {
            TableRow::new()
                .cell(CellValue::Band(*band))
                .cell(CellValue::Number(data.distribution.for_band(*band) as i64))
                .cell(CellValue::Pct(data.percentages.for_band(*band)))
        })
        .collect();
    TableFormatter::new(&dist_columns).output(&rows, global.format);

    println!();
    println!(
        "{}",
        style("Cartographie (impact 5->1, probabilité 1->5)")
            .bold()
            .underlined()
    );
    for row in &data.heatmap {
        let cells: Vec<String> = row
            .data
            .iter()
            .map(|cell| {
                if cell.y == 0 {
                    style(" .".to_string()).dim().to_string()
                } else {
                    format!("{:>2}", cell.y)
                }
            })
            .collect();
        println!("  {} | {}", row.id, cells.join(" "));
    }
    println!("       1  2  3  4  5");

    println!();
    println!("{}", style("Risques majeurs").bold().underlined());
    let top_columns = [
        ColumnDef::new("SCÉNARIO", 30),
        ColumnDef::new("P", 3),
        ColumnDef::new("I", 3),
        ColumnDef::new("NIVEAU", 8),
        ColumnDef::new("BANDE", 12),
    ];
    let rows: Vec<TableRow> = data
        .top_risks
        .iter()
        .map(|entry| {
            TableRow::new()
                .cell(CellValue::Text(entry.scenario.clone()))
                .cell(CellValue::Number(entry.probability as i64))
                .cell(CellValue::Number(entry.impact as i64))
                .cell(CellValue::Number(entry.level as i64))
                .cell(CellValue::Text(entry.band.clone()))
        })
        .collect();
    TableFormatter::new(&top_columns).output(&rows, global.format);

    if let Some(trend) = &data.trend {
        println!();
        println!(
            "{} moyenne actuelle {:.1}, période précédente {:.1} ({:+.1}%)",
            style("Tendance (simulée):").bold(),
            trend.current,
            trend.previous,
            trend.change_pct
        );
    }

    if !data.treatments.is_empty() {
        println!();
        println!("{}", style("Traitements").bold().underlined());
        let columns = [
            ColumnDef::new("SCÉNARIO", 30),
            ColumnDef::new("OPTION", 12),
            ColumnDef::new("MESURES", 8),
            ColumnDef::new("RÉSIDUEL", 9),
        ];
        let rows: Vec<TableRow> = data
            .treatments
            .iter()
            .map(|t| {
                TableRow::new()
                    .cell(CellValue::Text(t.scenario.clone()))
                    .cell(CellValue::Text(t.kind.clone()))
                    .cell(CellValue::Number(t.measures as i64))
                    .cell(CellValue::Number(t.residual_level as i64))
            })
            .collect();
        TableFormatter::new(&columns).output(&rows, global.format);
    }

    if !data.monitoring.is_empty() {
        println!();
        println!("{}", style("Cadre de suivi").bold().underlined());
        for entry in &data.monitoring {
            println!("  - {} ({})", entry.name, entry.frequency);
        }
    }
    println!();
}

fn render_md(data: &ReportData) {
    println!("# Rapport d'analyse de risques");
    println!();
    println!("## Périmètre");
    println!();
    println!("{}", data.scope.description);
    println!();

    println!("## Répartition des risques");
    println!();
    println!("| Niveau | Nombre | Part |");
    println!("|---|---|---|");
    for band in RiskBand::all() {
        println!(
            "| {} | {} | {}% |",
            band.label_fr(),
            data.distribution.for_band(*band),
            data.percentages.for_band(*band)
        );
    }
    println!();

    println!("## Risques majeurs");
    println!();
    println!("| Scénario | P | I | Niveau | Bande |");
    println!("|---|---|---|---|---|");
    for entry in &data.top_risks {
        println!(
            "| {} | {} | {} | {} | {} |",
            entry.scenario.replace('|', "\\|"),
            entry.probability,
            entry.impact,
            entry.level,
            entry.band
        );
    }
    println!();

    if let Some(trend) = &data.trend {
        println!(
            "Tendance (simulée): moyenne actuelle {:.1}, précédente {:.1} ({:+.1}%)",
            trend.current, trend.previous, trend.change_pct
        );
        println!();
    }

    if !data.treatments.is_empty() {
        println!("## Traitements");
        println!();
        println!("| Scénario | Option | Mesures | Résiduel |");
        println!("|---|---|---|---|");
        for t in &data.treatments {
            println!(
                "| {} | {} | {} | {} ({}) |",
                t.scenario.replace('|', "\\|"),
                t.kind,
                t.measures,
                t.residual_level,
                t.residual_band
            );
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::{EntityId, EntityPrefix};
    use crate::entities::{Risk, StrategicScenario};

    fn session_with_risks() -> Session {
        let mut session = Session::new();
        let mut scenario = StrategicScenario::new(
            "Data breach".to_string(),
            "Exfiltration of order records".to_string(),
        );
        scenario.sources.push(EntityId::new(EntityPrefix::Src));
        scenario
            .targeted_values
            .push(EntityId::new(EntityPrefix::Bv));
        let id = scenario.id.clone();
        session.strategic_scenarios.add(scenario).unwrap();
        session.risks.add(Risk::new(id, 4, 5)).unwrap();
        session
    }

    #[test]
    fn test_build_counts_and_distribution() {
        let data = build(&session_with_risks());
        assert_eq!(data.counts.strategic_scenarios, 1);
        assert_eq!(data.counts.risks, 1);
        assert_eq!(data.distribution.critical, 1);
        assert_eq!(data.percentages.critical, 100);
        assert_eq!(data.heatmap.len(), 5);
        assert_eq!(data.top_risks.len(), 1);
        assert_eq!(data.top_risks[0].level, 20);
        assert!(data.trend.is_some());
    }

    #[test]
    fn test_build_empty_session() {
        let data = build(&Session::new());
        assert_eq!(data.distribution.total(), 0);
        assert_eq!(data.percentages.total(), 0);
        assert!(data.trend.is_none());
        assert!(data.top_risks.is_empty());
        // the grid is dense even with no data
        assert_eq!(data.heatmap.len(), 5);
        assert!(data.heatmap.iter().all(|r| r.data.len() == 5));
    }

    #[test]
    fn test_baseline_resolves_names_with_fallback() {
        use crate::core::entity::Importance;
        use crate::core::session::{UNKNOWN_BUSINESS_VALUE, UNKNOWN_STAKEHOLDER};
        use crate::entities::{Asset, AssetKind, BusinessValue, Stakeholder, Threat};

        let mut session = Session::new();
        session
            .stakeholders
            .add(Stakeholder::new("Direction".to_string()))
            .unwrap();
        let stk_id = session.stakeholders.items()[0].id.clone();

        let mut bv = BusinessValue::new(
            "Commandes".to_string(),
            "Prise de commande en ligne".to_string(),
            Importance::High,
        );
        bv.stakeholders.push(stk_id);
        bv.stakeholders.push(EntityId::new(EntityPrefix::Stk));
        let bv_id = bv.id.clone();
        session.business_values.add(bv).unwrap();

        let mut asset = Asset::new(
            "Serveur web".to_string(),
            "Frontal de prise de commande".to_string(),
            AssetKind::Hardware,
        );
        asset.business_values.push(bv_id);
        asset.business_values.push(EntityId::new(EntityPrefix::Bv));
        session.assets.add(asset).unwrap();

        session
            .threats
            .add(Threat::new(
                "Rançongiciel".to_string(),
                "Chiffrement des serveurs".to_string(),
            ))
            .unwrap();

        let data = build(&session);
        assert_eq!(data.business_values.len(), 1);
        assert_eq!(data.business_values[0].stakeholders[0], "Direction");
        // Dangling references resolve to the fallback label, never fail
        assert_eq!(data.business_values[0].stakeholders[1], UNKNOWN_STAKEHOLDER);
        assert_eq!(data.assets[0].business_values[0], "Commandes");
        assert_eq!(data.assets[0].business_values[1], UNKNOWN_BUSINESS_VALUE);
        assert_eq!(data.threats.len(), 1);
        assert_eq!(data.threats[0].name, "Rançongiciel");
    }

    #[test]
    fn test_report_serializes_to_json() {
        let data = build(&session_with_risks());
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["heatmap"].as_array().unwrap().len(), 5);
        assert_eq!(json["pie"].as_array().unwrap().len(), 4);
        assert_eq!(json["top_risks"][0]["band"], "Critique");
    }
}
