//! Workshop 5 - risk treatment
//!
//! Five steps: pick a treatment option per scenario, define security
//! measures, rate residual risks, review the improvement plan, set up
//! the monitoring framework.

use console::style;
use miette::Result;

use crate::cli::commands::forms::{self, ListAction};
use crate::cli::commands::scales::{EFFECTIVENESS_LABELS, IMPACT_LABELS, PROBABILITY_LABELS};
use crate::core::identity::EntityId;
use crate::core::session::Session;
use crate::core::workshop::workshop;
use crate::entities::{
    ControlKind, Frequency, Measure, MonitoringEntry, RiskTreatment, TreatmentKind,
};

pub const WORKSHOP_ID: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    TreatmentOptions,
    SecurityMeasures,
    ResidualRisks,
    ImprovementPlan,
    MonitoringPlan,
}

const STEPS: [Step; 5] = [
    Step::TreatmentOptions,
    Step::SecurityMeasures,
    Step::ResidualRisks,
    Step::ImprovementPlan,
    Step::MonitoringPlan,
];

pub fn run(session: &mut Session) -> Result<()> {
    let def = workshop(WORKSHOP_ID).expect("workshop 5 is in the catalog");
    for (index, step) in STEPS.iter().enumerate() {
        if session.progress.is_step_complete(WORKSHOP_ID, index) {
            continue;
        }
        println!();
        println!(
            "{} {}",
            style(format!("[{}/{}]", index + 1, def.steps.len())).cyan(),
            style(def.steps[index]).bold()
        );
        match step {
            Step::TreatmentOptions => run_treatment_options(session)?,
            Step::SecurityMeasures => run_security_measures(session)?,
            Step::ResidualRisks => run_residual_risks(session)?,
            Step::ImprovementPlan => run_improvement_plan(session)?,
            Step::MonitoringPlan => run_monitoring_plan(session)?,
        }
        session.progress.mark_step_complete(WORKSHOP_ID, index);
    }
    Ok(())
}

fn treatment_ids(session: &Session) -> Vec<EntityId> {
    session
        .treatments
        .items()
        .iter()
        .map(|t| t.id.clone())
        .collect()
}

/// One treatment decision per strategic scenario
fn run_treatment_options(session: &mut Session) -> Result<()> {
    let scenarios: Vec<(EntityId, String)> = session
        .strategic_scenarios
        .items()
        .iter()
        .map(|s| (s.id.clone(), s.name.clone()))
        .collect();

    for (scenario_id, name) in &scenarios {
        if session
            .treatments
            .items()
            .iter()
            .any(|t| &t.scenario == scenario_id)
        {
            continue;
        }
        println!("{}", style(name).bold());
        if let Some(risk) = session.risk_for_scenario(scenario_id) {
            println!(
                "  Niveau actuel: {} ({})",
                risk.level(),
                risk.band().label_fr()
            );
        }
        let kinds = TreatmentKind::all();
        let labels: Vec<String> = kinds.iter().map(|k| k.to_string()).collect();
        let idx = forms::select_index("Option de traitement", &labels)?;
        loop {
            let description = forms::input_text("Description de la stratégie")?;
            let treatment = RiskTreatment::new(scenario_id.clone(), kinds[idx], description);
            match session.treatments.add(treatment) {
                Ok(()) => break,
                Err(errors) => forms::print_validation_errors(&errors),
            }
        }
    }

    session
        .treatments
        .submit("option de traitement")
        .map_err(|errors| miette::miette!("{}", errors))?;
    Ok(())
}

fn run_security_measures(session: &mut Session) -> Result<()> {
    for id in treatment_ids(session) {
        let scenario_label = session
            .treatments
            .get(&id)
            .map(|t| session.scenario_name(&t.scenario).to_string())
            .unwrap_or_default();
        let Some(mut draft) = session.treatments.start_edit(&id) else {
            continue;
        };
        if draft.kind == TreatmentKind::Acceptance {
            // Accepted risks carry no new measures
            session.treatments.cancel_edit();
            continue;
        }
        println!("{} ({})", style(&scenario_label).bold(), draft.kind);
        for measure in &draft.measures {
            println!("  - {} (échéance {})", measure.name, measure.deadline);
        }
        while forms::confirm("Ajouter une mesure de sécurité ?", draft.measures.is_empty())? {
            let name = forms::input_text("Nom de la mesure")?;
            let kinds = ControlKind::all();
            let labels: Vec<String> = kinds.iter().map(|k| k.to_string()).collect();
            let idx = forms::select_index("Famille", &labels)?;
            let effectiveness = forms::select_rating("Efficacité", &EFFECTIVENESS_LABELS)?;
            let deadline = forms::input_date("Échéance")?;
            let mut measure = Measure::new(name, kinds[idx], effectiveness, deadline);
            measure.cost = forms::input_f64("Coût estimé")?;
            draft.measures.push(measure);
        }
        while let Err(errors) = session.treatments.save_draft(draft.clone()) {
            forms::print_validation_errors(&errors);
            draft.description = forms::input_text("Description de la stratégie")?;
        }
    }
    Ok(())
}

fn run_residual_risks(session: &mut Session) -> Result<()> {
    for id in treatment_ids(session) {
        let scenario_label = session
            .treatments
            .get(&id)
            .map(|t| session.scenario_name(&t.scenario).to_string())
            .unwrap_or_default();
        let Some(mut draft) = session.treatments.start_edit(&id) else {
            continue;
        };
        println!("{}", style(&scenario_label).bold());
        draft.residual_risk.probability =
            forms::select_rating("Probabilité résiduelle", &PROBABILITY_LABELS)?;
        draft.residual_risk.impact =
            forms::select_rating("Impact résiduel", &IMPACT_LABELS)?;
        draft.residual_risk.justification = forms::input_text("Justification")?;
        println!(
            "  Niveau résiduel: {}",
            style(draft.residual_risk.level()).bold().yellow()
        );
        while let Err(errors) = session.treatments.save_draft(draft.clone()) {
            forms::print_validation_errors(&errors);
            draft.residual_risk.justification = forms::input_text("Justification")?;
        }
    }
    Ok(())
}

/// Review all planned measures ordered by deadline
fn run_improvement_plan(session: &mut Session) -> Result<()> {
    let mut entries: Vec<(chrono::NaiveDate, String, String)> = session
        .treatments
        .items()
        .iter()
        .flat_map(|t| {
            t.measures.iter().map(|m| {
                (
                    m.deadline,
                    m.name.clone(),
                    session.scenario_name(&t.scenario).to_string(),
                )
            })
        })
        .collect();
    entries.sort_by_key(|(deadline, _, _)| *deadline);

    if entries.is_empty() {
        println!("  {}", style("Aucune mesure planifiée.").dim());
    }
    for (deadline, name, scenario) in &entries {
        println!("  {} {} ({})", style(deadline).cyan(), name, scenario);
    }

    loop {
        if forms::confirm("Valider le plan d'amélioration ?", true)? {
            return Ok(());
        }
    }
}

fn run_monitoring_plan(session: &mut Session) -> Result<()> {
    loop {
        for entry in session.monitoring_plan.items() {
            println!("  - {} ({})", entry.name, entry.frequency);
        }
        match forms::list_action("cadre de suivi", session.monitoring_plan.len())? {
            ListAction::Add => {
                let name = forms::input_text("Intitulé du suivi")?;
                let frequencies = Frequency::all();
                let labels: Vec<String> = frequencies.iter().map(|f| f.to_string()).collect();
                let idx = forms::select_index("Fréquence", &labels)?;
                let mut entry = MonitoringEntry::new(name, frequencies[idx]);
                entry.indicators = forms::input_lines("Indicateur suivi")?;
                entry.stakeholders = forms::input_lines("Destinataire de la revue")?;
                if let Err(errors) = session.monitoring_plan.add(entry) {
                    forms::print_validation_errors(&errors);
                }
            }
            ListAction::Edit => {
                let labels: Vec<String> = session
                    .monitoring_plan
                    .items()
                    .iter()
                    .map(|e| e.name.clone())
                    .collect();
                let idx = forms::select_index("Suivi à modifier", &labels)?;
                let id = session.monitoring_plan.items()[idx].id.clone();
                if let Some(mut draft) = session.monitoring_plan.start_edit(&id) {
                    draft.name = forms::input_text_default("Intitulé", &draft.name)?;
                    if let Err(errors) = session.monitoring_plan.save_draft(draft) {
                        forms::print_validation_errors(&errors);
                        session.monitoring_plan.cancel_edit();
                    }
                }
            }
            ListAction::Remove => {
                let labels: Vec<String> = session
                    .monitoring_plan
                    .items()
                    .iter()
                    .map(|e| e.name.clone())
                    .collect();
                let idx = forms::select_index("Suivi à supprimer", &labels)?;
                let id = session.monitoring_plan.items()[idx].id.clone();
                session.monitoring_plan.remove(&id);
            }
            ListAction::Done => match session.monitoring_plan.submit("cadre de suivi") {
                Ok(()) => return Ok(()),
                Err(errors) => forms::print_validation_errors(&errors),
            },
        }
    }
}
