//! Workshop 4 - operational scenarios
//!
//! Four steps: decompose the strategic scenarios, record existing
//! controls, rate technical likelihood, then evaluate every strategic
//! scenario on the 1-5 grid for the synthesis map.

use console::style;
use miette::Result;

use crate::cli::commands::forms::{self, ListAction};
use crate::cli::commands::scales::{
    EFFECTIVENESS_LABELS, IMPACT_LABELS, LIKELIHOOD_LABELS, PROBABILITY_LABELS, SEVERITY_LABELS,
};
use crate::core::identity::EntityId;
use crate::core::session::Session;
use crate::core::workshop::workshop;
use crate::entities::{AttackModeKind, Control, ControlKind, OperationalScenario, Risk};
use crate::report;

pub const WORKSHOP_ID: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Decomposition,
    ExistingControls,
    Evaluation,
    Synthesis,
}

const STEPS: [Step; 4] = [
    Step::Decomposition,
    Step::ExistingControls,
    Step::Evaluation,
    Step::Synthesis,
];

pub fn run(session: &mut Session) -> Result<()> {
    let def = workshop(WORKSHOP_ID).expect("workshop 4 is in the catalog");
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
            Step::Decomposition => run_decomposition(session)?,
            Step::ExistingControls => run_existing_controls(session)?,
            Step::Evaluation => run_evaluation(session)?,
            Step::Synthesis => run_synthesis(session)?,
        }
        session.progress.mark_step_complete(WORKSHOP_ID, index);
    }
    Ok(())
}

fn run_decomposition(session: &mut Session) -> Result<()> {
    loop {
        for ops in session.operational_scenarios.items() {
            println!(
                "  - {} (dérivé de {})",
                ops.name,
                session.scenario_name(&ops.strategic_scenario)
            );
        }
        match forms::list_action(
            "scénario opérationnel",
            session.operational_scenarios.len(),
        )? {
            ListAction::Add => {
                let parents: Vec<(EntityId, String)> = session
                    .strategic_scenarios
                    .items()
                    .iter()
                    .map(|s| (s.id.clone(), s.name.clone()))
                    .collect();
                let parent = forms::pick_one("Scénario stratégique décomposé", &parents)?;
                let name = forms::input_text("Intitulé du scénario opérationnel")?;
                let description = forms::input_text("Description du chemin d'attaque")?;
                let mut ops = OperationalScenario::new(name, description, parent);

                let kinds = AttackModeKind::all();
                let labels: Vec<String> = kinds.iter().map(|k| k.to_string()).collect();
                let idx = forms::select_index("Mode d'attaque", &labels)?;
                ops.mode.kind = kinds[idx];
                ops.mode.details = forms::input_text_optional("Détails du mode d'attaque")?;

                if let Err(errors) = session.operational_scenarios.add(ops) {
                    forms::print_validation_errors(&errors);
                }
            }
            ListAction::Edit => {
                let labels: Vec<String> = session
                    .operational_scenarios
                    .items()
                    .iter()
                    .map(|o| o.name.clone())
                    .collect();
                let idx = forms::select_index("Scénario à modifier", &labels)?;
                let id = session.operational_scenarios.items()[idx].id.clone();
                if let Some(mut draft) = session.operational_scenarios.start_edit(&id) {
                    draft.name = forms::input_text_default("Intitulé", &draft.name)?;
                    draft.description =
                        forms::input_text_default("Description", &draft.description)?;
                    if let Err(errors) = session.operational_scenarios.save_draft(draft) {
                        forms::print_validation_errors(&errors);
                        session.operational_scenarios.cancel_edit();
                    }
                }
            }
            ListAction::Remove => {
                let labels: Vec<String> = session
                    .operational_scenarios
                    .items()
                    .iter()
                    .map(|o| o.name.clone())
                    .collect();
                let idx = forms::select_index("Scénario à supprimer", &labels)?;
                let id = session.operational_scenarios.items()[idx].id.clone();
                session.operational_scenarios.remove(&id);
            }
            ListAction::Done => match session.operational_scenarios.submit("scénario opérationnel") {
                Ok(()) => return Ok(()),
                Err(errors) => forms::print_validation_errors(&errors),
            },
        }
    }
}

/// Record the controls already in place, per operational scenario
fn run_existing_controls(session: &mut Session) -> Result<()> {
    let ids: Vec<EntityId> = session
        .operational_scenarios
        .items()
        .iter()
        .map(|o| o.id.clone())
        .collect();

    for id in ids {
        let Some(mut draft) = session.operational_scenarios.start_edit(&id) else {
            continue;
        };
        println!("{}", style(&draft.name).bold());
        for control in &draft.existing_controls {
            println!("  - {} ({})", control.name, control.kind);
        }
        while forms::confirm("Ajouter une mesure existante ?", false)? {
            let name = forms::input_text("Nom de la mesure")?;
            let kinds = ControlKind::all();
            let labels: Vec<String> = kinds.iter().map(|k| k.to_string()).collect();
            let idx = forms::select_index("Famille", &labels)?;
            let effectiveness = forms::select_rating("Efficacité", &EFFECTIVENESS_LABELS)?;
            draft
                .existing_controls
                .push(Control::new(name, kinds[idx], effectiveness));
        }
        while let Err(errors) = session.operational_scenarios.save_draft(draft.clone()) {
            forms::print_validation_errors(&errors);
            draft.name = forms::input_text("Intitulé")?;
        }
    }
    Ok(())
}

/// Rate technical likelihood and impact of each operational scenario (1-4)
fn run_evaluation(session: &mut Session) -> Result<()> {
    let ids: Vec<EntityId> = session
        .operational_scenarios
        .items()
        .iter()
        .map(|o| o.id.clone())
        .collect();

    for id in ids {
        let Some(mut draft) = session.operational_scenarios.start_edit(&id) else {
            continue;
        };
        println!("{}", style(&draft.name).bold());
        draft.probability =
            forms::select_rating("Vraisemblance technique", &LIKELIHOOD_LABELS)?;
        draft.impact = forms::select_rating("Impact", &SEVERITY_LABELS)?;
        draft.justification =
            forms::input_text_default("Justification", &draft.justification)?;
        println!(
            "  Niveau opérationnel: {}",
            style(draft.level()).bold().yellow()
        );
        while let Err(errors) = session.operational_scenarios.save_draft(draft.clone()) {
            forms::print_validation_errors(&errors);
            draft.justification = forms::input_text("Justification")?;
        }
    }
    Ok(())
}

/// Evaluate every strategic scenario on the 1-5 probability/impact grid,
/// then show the resulting distribution. The step cannot complete while
/// any scenario is still unevaluated.
fn run_synthesis(session: &mut Session) -> Result<()> {
    loop {
        let pending: Vec<(EntityId, String)> = session
            .unevaluated_scenarios()
            .iter()
            .map(|s| (s.id.clone(), s.name.clone()))
            .collect();
        if pending.is_empty() {
            break;
        }
        for (id, name) in pending {
            println!("{}", style(&name).bold());
            let probability = forms::select_rating("Probabilité", &PROBABILITY_LABELS)?;
            let impact = forms::select_rating("Impact", &IMPACT_LABELS)?;
            let mut risk = Risk::new(id, probability, impact);
            let comment = forms::input_text_optional("Commentaire")?;
            if !comment.trim().is_empty() {
                risk.comment = Some(comment);
            }
            println!(
                "  Niveau de risque: {} ({})",
                style(risk.level()).bold().yellow(),
                risk.band().label_fr()
            );
            if let Err(errors) = session.risks.add(risk) {
                forms::print_validation_errors(&errors);
            }
        }
    }

    let dist = report::distribution(session.risks.items());
    let pct = dist.percentages();
    println!();
    println!("{}", style("Synthèse des risques").bold().underlined());
    println!(
        "  Faible: {} ({}%)  Moyen: {} ({}%)  Élevé: {} ({}%)  Critique: {} ({}%)",
        dist.low, pct.low, dist.medium, pct.medium, dist.high, pct.high, dist.critical,
        pct.critical
    );
    Ok(())
}
