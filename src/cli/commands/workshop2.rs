//! Workshop 2 - risk sources
//!
//! Four steps: identify sources, characterize them, define targeted
//! objectives, rate the source-objective pairs.

use console::style;
use miette::Result;

use crate::cli::commands::forms::{self, ListAction};
use crate::cli::commands::scales::LIKELIHOOD_LABELS;
use crate::core::entity::Importance;
use crate::core::identity::EntityId;
use crate::core::session::Session;
use crate::core::workshop::workshop;
use crate::entities::{RiskSource, SourceCategory, SourceObjectivePair, TargetedObjective};

pub const WORKSHOP_ID: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Sources,
    Characterization,
    Objectives,
    Pairs,
}

const STEPS: [Step; 4] = [
    Step::Sources,
    Step::Characterization,
    Step::Objectives,
    Step::Pairs,
];

pub fn run(session: &mut Session) -> Result<()> {
    let def = workshop(WORKSHOP_ID).expect("workshop 2 is in the catalog");
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
            Step::Sources => run_sources(session)?,
            Step::Characterization => run_characterization(session)?,
            Step::Objectives => run_objectives(session)?,
            Step::Pairs => run_pairs(session)?,
        }
        session.progress.mark_step_complete(WORKSHOP_ID, index);
    }
    Ok(())
}

fn run_sources(session: &mut Session) -> Result<()> {
    loop {
        for source in session.risk_sources.items() {
            println!("  - {} ({})", source.name, source.category);
        }
        match forms::list_action("source de risque", session.risk_sources.len())? {
            ListAction::Add => {
                let name = forms::input_text("Nom de la source")?;
                let description = forms::input_text("Description")?;
                let categories = SourceCategory::all();
                let labels: Vec<String> = categories.iter().map(|c| c.to_string()).collect();
                let idx = forms::select_index("Catégorie", &labels)?;
                let source = RiskSource::new(name, description, categories[idx]);
                if let Err(errors) = session.risk_sources.add(source) {
                    forms::print_validation_errors(&errors);
                }
            }
            ListAction::Edit => {
                let labels: Vec<String> = session
                    .risk_sources
                    .items()
                    .iter()
                    .map(|s| s.name.clone())
                    .collect();
                let idx = forms::select_index("Source à modifier", &labels)?;
                let id = session.risk_sources.items()[idx].id.clone();
                if let Some(mut draft) = session.risk_sources.start_edit(&id) {
                    draft.name = forms::input_text_default("Nom", &draft.name)?;
                    draft.description =
                        forms::input_text_default("Description", &draft.description)?;
                    if let Err(errors) = session.risk_sources.save_draft(draft) {
                        forms::print_validation_errors(&errors);
                        session.risk_sources.cancel_edit();
                    }
                }
            }
            ListAction::Remove => {
                let labels: Vec<String> = session
                    .risk_sources
                    .items()
                    .iter()
                    .map(|s| s.name.clone())
                    .collect();
                let idx = forms::select_index("Source à supprimer", &labels)?;
                let id = session.risk_sources.items()[idx].id.clone();
                session.risk_sources.remove(&id);
            }
            ListAction::Done => match session.risk_sources.submit("source de risque") {
                Ok(()) => return Ok(()),
                Err(errors) => forms::print_validation_errors(&errors),
            },
        }
    }
}

/// Walk every source through motivation, capabilities and opportunities.
/// Uses the edit slot so a validation failure never loses the record.
fn run_characterization(session: &mut Session) -> Result<()> {
    const CAPABILITY_LABELS: [&str; 5] = [
        "Très limitées",
        "Limitées",
        "Moyennes",
        "Importantes",
        "Très importantes",
    ];

    let ids: Vec<EntityId> = session
        .risk_sources
        .items()
        .iter()
        .map(|s| s.id.clone())
        .collect();

    for id in ids {
        let Some(mut draft) = session.risk_sources.start_edit(&id) else {
            continue;
        };
        println!("{}", style(&draft.name).bold());
        draft.motivation = forms::input_text_default("Motivation", &draft.motivation)?;
        draft.capabilities.technical =
            forms::select_rating("Capacités techniques", &CAPABILITY_LABELS)?;
        draft.capabilities.financial =
            forms::select_rating("Capacités financières", &CAPABILITY_LABELS)?;
        draft.capabilities.human =
            forms::select_rating("Capacités humaines", &CAPABILITY_LABELS)?;
        draft.opportunities = forms::input_lines("Opportunité exploitable")?;

        while let Err(errors) = session.risk_sources.save_draft(draft.clone()) {
            forms::print_validation_errors(&errors);
            draft.motivation = forms::input_text("Motivation")?;
        }
    }
    Ok(())
}

fn run_objectives(session: &mut Session) -> Result<()> {
    loop {
        for objective in session.objectives.items() {
            println!("  - {} (impact {})", objective.name, objective.impact);
        }
        match forms::list_action("objectif visé", session.objectives.len())? {
            ListAction::Add => {
                let name = forms::input_text("Objectif visé")?;
                let description = forms::input_text("Description")?;
                let all = Importance::all();
                let labels: Vec<String> = all.iter().map(|i| i.to_string()).collect();
                let idx = forms::select_index("Impact métier si atteint", &labels)?;
                let mut objective = TargetedObjective::new(name, description, all[idx]);
                objective.motivation = forms::input_text_optional("Motivation associée")?;
                if let Err(errors) = session.objectives.add(objective) {
                    forms::print_validation_errors(&errors);
                }
            }
            ListAction::Edit => {
                let labels: Vec<String> = session
                    .objectives
                    .items()
                    .iter()
                    .map(|o| o.name.clone())
                    .collect();
                let idx = forms::select_index("Objectif à modifier", &labels)?;
                let id = session.objectives.items()[idx].id.clone();
                if let Some(mut draft) = session.objectives.start_edit(&id) {
                    draft.name = forms::input_text_default("Objectif", &draft.name)?;
                    draft.description =
                        forms::input_text_default("Description", &draft.description)?;
                    if let Err(errors) = session.objectives.save_draft(draft) {
                        forms::print_validation_errors(&errors);
                        session.objectives.cancel_edit();
                    }
                }
            }
            ListAction::Remove => {
                let labels: Vec<String> = session
                    .objectives
                    .items()
                    .iter()
                    .map(|o| o.name.clone())
                    .collect();
                let idx = forms::select_index("Objectif à supprimer", &labels)?;
                let id = session.objectives.items()[idx].id.clone();
                session.objectives.remove(&id);
            }
            ListAction::Done => match session.objectives.submit("objectif visé") {
                Ok(()) => return Ok(()),
                Err(errors) => forms::print_validation_errors(&errors),
            },
        }
    }
}

fn run_pairs(session: &mut Session) -> Result<()> {
    loop {
        for pair in session.pairs.items() {
            println!(
                "  - {} -> {} (vraisemblance {})",
                session.source_name(&pair.source),
                session.objective_name(&pair.objective),
                pair.likelihood
            );
        }
        match forms::list_action("couple source-objectif", session.pairs.len())? {
            ListAction::Add => {
                let source_options: Vec<(EntityId, String)> = session
                    .risk_sources
                    .items()
                    .iter()
                    .map(|s| (s.id.clone(), s.name.clone()))
                    .collect();
                let objective_options: Vec<(EntityId, String)> = session
                    .objectives
                    .items()
                    .iter()
                    .map(|o| (o.id.clone(), o.name.clone()))
                    .collect();
                let source = forms::pick_one("Source de risque", &source_options)?;
                let objective = forms::pick_one("Objectif visé", &objective_options)?;
                let likelihood = forms::select_rating("Vraisemblance", &LIKELIHOOD_LABELS)?;
                let justification = forms::input_text("Justification")?;
                let pair = SourceObjectivePair::new(source, objective, likelihood, justification);
                if let Err(errors) = session.pairs.add(pair) {
                    forms::print_validation_errors(&errors);
                }
            }
            ListAction::Edit => {
                let labels: Vec<String> = session
                    .pairs
                    .items()
                    .iter()
                    .map(|p| {
                        format!(
                            "{} -> {}",
                            session.source_name(&p.source),
                            session.objective_name(&p.objective)
                        )
                    })
                    .collect();
                let idx = forms::select_index("Couple à modifier", &labels)?;
                let id = session.pairs.items()[idx].id.clone();
                if let Some(mut draft) = session.pairs.start_edit(&id) {
                    draft.likelihood = forms::select_rating("Vraisemblance", &LIKELIHOOD_LABELS)?;
                    draft.justification =
                        forms::input_text_default("Justification", &draft.justification)?;
                    if let Err(errors) = session.pairs.save_draft(draft) {
                        forms::print_validation_errors(&errors);
                        session.pairs.cancel_edit();
                    }
                }
            }
            ListAction::Remove => {
                let labels: Vec<String> = session
                    .pairs
                    .items()
                    .iter()
                    .map(|p| {
                        format!(
                            "{} -> {}",
                            session.source_name(&p.source),
                            session.objective_name(&p.objective)
                        )
                    })
                    .collect();
                let idx = forms::select_index("Couple à supprimer", &labels)?;
                let id = session.pairs.items()[idx].id.clone();
                session.pairs.remove(&id);
            }
            ListAction::Done => match session.pairs.submit("couple source-objectif") {
                Ok(()) => return Ok(()),
                Err(errors) => forms::print_validation_errors(&errors),
            },
        }
    }
}
