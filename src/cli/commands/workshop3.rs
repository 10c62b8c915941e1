//! Workshop 3 - strategic scenarios
//!
//! Four steps: build the scenarios, review their source associations,
//! rate severity, then rate and justify likelihood while recording the
//! security controls already in place against each scenario.

use console::style;
use miette::Result;

use crate::cli::commands::forms::{self, ListAction};
use crate::cli::commands::scales::{EFFECTIVENESS_LABELS, LIKELIHOOD_LABELS, SEVERITY_LABELS};
use crate::core::identity::EntityId;
use crate::core::session::Session;
use crate::core::workshop::workshop;
use crate::entities::{Control, ControlKind, OperatingMode, StrategicScenario};

pub const WORKSHOP_ID: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Construction,
    Association,
    Severity,
    Likelihood,
}

const STEPS: [Step; 4] = [
    Step::Construction,
    Step::Association,
    Step::Severity,
    Step::Likelihood,
];

pub fn run(session: &mut Session) -> Result<()> {
    let def = workshop(WORKSHOP_ID).expect("workshop 3 is in the catalog");
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
            Step::Construction => run_construction(session)?,
            Step::Association => run_association(session)?,
            Step::Severity => run_severity(session)?,
            Step::Likelihood => run_likelihood(session)?,
        }
        session.progress.mark_step_complete(WORKSHOP_ID, index);
    }
    Ok(())
}

fn source_options(session: &Session) -> Vec<(EntityId, String)> {
    session
        .risk_sources
        .items()
        .iter()
        .map(|s| (s.id.clone(), s.name.clone()))
        .collect()
}

fn scenario_ids(session: &Session) -> Vec<EntityId> {
    session
        .strategic_scenarios
        .items()
        .iter()
        .map(|s| s.id.clone())
        .collect()
}

fn run_construction(session: &mut Session) -> Result<()> {
    loop {
        for scenario in session.strategic_scenarios.items() {
            println!("  - {} ({})", scenario.name, scenario.mode);
        }
        match forms::list_action(
            "scénario stratégique",
            session.strategic_scenarios.len(),
        )? {
            ListAction::Add => {
                let name = forms::input_text("Intitulé du scénario")?;
                let description = forms::input_text("Description")?;
                let mut scenario = StrategicScenario::new(name, description);

                let modes = OperatingMode::all();
                let labels: Vec<String> = modes.iter().map(|m| m.to_string()).collect();
                let idx = forms::select_index("Mode opératoire", &labels)?;
                scenario.mode = modes[idx];

                let sources = source_options(session);
                let values = crate::cli::commands::workshop1::business_value_options(session);
                scenario.sources = forms::pick_many("Sources de risque à l'origine", &sources)?;
                scenario.targeted_values =
                    forms::pick_many("Valeurs métier visées", &values)?;
                // Ratings are refined in the dedicated steps; 1 keeps the record valid
                scenario.severity = 1;
                scenario.likelihood = 1;

                if let Err(errors) = session.strategic_scenarios.add(scenario) {
                    forms::print_validation_errors(&errors);
                }
            }
            ListAction::Edit => {
                let labels: Vec<String> = session
                    .strategic_scenarios
                    .items()
                    .iter()
                    .map(|s| s.name.clone())
                    .collect();
                let idx = forms::select_index("Scénario à modifier", &labels)?;
                let id = session.strategic_scenarios.items()[idx].id.clone();
                if let Some(mut draft) = session.strategic_scenarios.start_edit(&id) {
                    draft.name = forms::input_text_default("Intitulé", &draft.name)?;
                    draft.description =
                        forms::input_text_default("Description", &draft.description)?;
                    if let Err(errors) = session.strategic_scenarios.save_draft(draft) {
                        forms::print_validation_errors(&errors);
                        session.strategic_scenarios.cancel_edit();
                    }
                }
            }
            ListAction::Remove => {
                let labels: Vec<String> = session
                    .strategic_scenarios
                    .items()
                    .iter()
                    .map(|s| s.name.clone())
                    .collect();
                let idx = forms::select_index("Scénario à supprimer", &labels)?;
                let id = session.strategic_scenarios.items()[idx].id.clone();
                session.strategic_scenarios.remove(&id);
            }
            ListAction::Done => match session.strategic_scenarios.submit("scénario stratégique") {
                Ok(()) => return Ok(()),
                Err(errors) => forms::print_validation_errors(&errors),
            },
        }
    }
}

/// Review and adjust which sources each scenario is attributed to
fn run_association(session: &mut Session) -> Result<()> {
    for id in scenario_ids(session) {
        let sources = source_options(session);
        let Some(mut draft) = session.strategic_scenarios.start_edit(&id) else {
            continue;
        };
        println!("{}", style(&draft.name).bold());
        for source_id in &draft.sources {
            println!("  - {}", session.source_name(source_id));
        }
        if forms::confirm("Revoir les sources associées ?", false)? {
            draft.sources = forms::pick_many("Sources de risque", &sources)?;
        }
        while let Err(errors) = session.strategic_scenarios.save_draft(draft.clone()) {
            forms::print_validation_errors(&errors);
            draft.sources = forms::pick_many("Sources de risque", &sources)?;
        }
    }
    Ok(())
}

fn run_severity(session: &mut Session) -> Result<()> {
    for id in scenario_ids(session) {
        let Some(mut draft) = session.strategic_scenarios.start_edit(&id) else {
            continue;
        };
        println!("{}", style(&draft.name).bold());
        draft.severity = forms::select_rating("Gravité (impact métier)", &SEVERITY_LABELS)?;
        while let Err(errors) = session.strategic_scenarios.save_draft(draft.clone()) {
            forms::print_validation_errors(&errors);
            draft.severity = forms::select_rating("Gravité (impact métier)", &SEVERITY_LABELS)?;
        }
    }
    Ok(())
}

/// Controls already in place weigh on the likelihood judgement, so they
/// are reviewed right before the rating
fn edit_controls(controls: &mut Vec<Control>) -> Result<()> {
    for control in controls.iter() {
        println!(
            "  - {} ({}, efficacité {})",
            control.name, control.kind, control.effectiveness
        );
    }
    while !controls.is_empty() && forms::confirm("Retirer une mesure existante ?", false)? {
        let labels: Vec<String> = controls.iter().map(|c| c.name.clone()).collect();
        let idx = forms::select_index("Mesure à retirer", &labels)?;
        controls.remove(idx);
    }
    while forms::confirm("Ajouter une mesure déjà en place ?", false)? {
        let name = forms::input_text("Nom de la mesure")?;
        let kinds = ControlKind::all();
        let labels: Vec<String> = kinds.iter().map(|k| k.to_string()).collect();
        let idx = forms::select_index("Famille", &labels)?;
        let effectiveness = forms::select_rating("Efficacité", &EFFECTIVENESS_LABELS)?;
        controls.push(Control::new(name, kinds[idx], effectiveness));
    }
    Ok(())
}

fn run_likelihood(session: &mut Session) -> Result<()> {
    for id in scenario_ids(session) {
        let Some(mut draft) = session.strategic_scenarios.start_edit(&id) else {
            continue;
        };
        println!("{}", style(&draft.name).bold());
        edit_controls(&mut draft.controls)?;
        draft.likelihood = forms::select_rating("Vraisemblance", &LIKELIHOOD_LABELS)?;
        draft.justification =
            forms::input_text_default("Justification", &draft.justification)?;
        while let Err(errors) = session.strategic_scenarios.save_draft(draft.clone()) {
            forms::print_validation_errors(&errors);
            draft.justification = forms::input_text("Justification")?;
        }
    }
    Ok(())
}
