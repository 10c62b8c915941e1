//! Workshop 1 - security baseline
//!
//! Five steps: business values and stakeholders, security criteria,
//! security needs, scope framing, supporting assets and threats.

use console::style;
use miette::Result;

use crate::cli::commands::forms::{self, ListAction};
use crate::core::accumulator::Validate;
use crate::core::entity::Importance;
use crate::core::identity::EntityId;
use crate::core::session::Session;
use crate::core::workshop::workshop;
use crate::entities::{
    Asset, AssetKind, BusinessValue, CriterionKind, Scope, SecurityCriterion, SecurityNeed,
    Stakeholder, Threat,
};

pub const WORKSHOP_ID: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    ValuesAndStakeholders,
    SecurityCriteria,
    SecurityNeeds,
    ScopeFraming,
    SupportingAssets,
}

const STEPS: [Step; 5] = [
    Step::ValuesAndStakeholders,
    Step::SecurityCriteria,
    Step::SecurityNeeds,
    Step::ScopeFraming,
    Step::SupportingAssets,
];

pub fn run(session: &mut Session) -> Result<()> {
    let def = workshop(WORKSHOP_ID).expect("workshop 1 is in the catalog");
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
            Step::ValuesAndStakeholders => run_values_and_stakeholders(session)?,
            Step::SecurityCriteria => run_security_criteria(session)?,
            Step::SecurityNeeds => run_security_needs(session)?,
            Step::ScopeFraming => run_scope(session)?,
            Step::SupportingAssets => run_assets(session)?,
        }
        session.progress.mark_step_complete(WORKSHOP_ID, index);
    }
    Ok(())
}

fn run_values_and_stakeholders(session: &mut Session) -> Result<()> {
    // Stakeholders first so business values can reference them
    loop {
        for s in session.stakeholders.items() {
            println!("  - {}", s.name);
        }
        match forms::list_action("partie prenante", session.stakeholders.len())? {
            ListAction::Add => {
                let name = forms::input_text("Nom de la partie prenante")?;
                let mut stakeholder = Stakeholder::new(name);
                stakeholder.needs = forms::input_lines("Attente")?;
                if let Err(errors) = session.stakeholders.add(stakeholder) {
                    forms::print_validation_errors(&errors);
                }
            }
            ListAction::Edit => {
                let labels: Vec<String> = session
                    .stakeholders
                    .items()
                    .iter()
                    .map(|s| s.name.clone())
                    .collect();
                let idx = forms::select_index("Partie prenante à modifier", &labels)?;
                let id = session.stakeholders.items()[idx].id.clone();
                if let Some(mut draft) = session.stakeholders.start_edit(&id) {
                    draft.name = forms::input_text_default("Nom", &draft.name)?;
                    if let Err(errors) = session.stakeholders.save_draft(draft) {
                        forms::print_validation_errors(&errors);
                        session.stakeholders.cancel_edit();
                    }
                }
            }
            ListAction::Remove => {
                let labels: Vec<String> = session
                    .stakeholders
                    .items()
                    .iter()
                    .map(|s| s.name.clone())
                    .collect();
                let idx = forms::select_index("Partie prenante à supprimer", &labels)?;
                let id = session.stakeholders.items()[idx].id.clone();
                session.stakeholders.remove(&id);
            }
            ListAction::Done => match session.stakeholders.submit("partie prenante") {
                Ok(()) => break,
                Err(errors) => forms::print_validation_errors(&errors),
            },
        }
    }

    loop {
        for bv in session.business_values.items() {
            println!("  - {} ({})", bv.name, bv.importance);
        }
        match forms::list_action("valeur métier", session.business_values.len())? {
            ListAction::Add => {
                let name = forms::input_text("Nom de la valeur métier")?;
                let description = forms::input_text("Description")?;
                let importance = pick_importance("Importance")?;
                let mut value = BusinessValue::new(name, description, importance);
                let options = stakeholder_options(session);
                value.stakeholders = forms::pick_many("Parties prenantes concernées", &options)?;
                if let Err(errors) = session.business_values.add(value) {
                    forms::print_validation_errors(&errors);
                }
            }
            ListAction::Edit => {
                let labels: Vec<String> = session
                    .business_values
                    .items()
                    .iter()
                    .map(|bv| bv.name.clone())
                    .collect();
                let idx = forms::select_index("Valeur métier à modifier", &labels)?;
                let id = session.business_values.items()[idx].id.clone();
                let options = stakeholder_options(session);
                if let Some(mut draft) = session.business_values.start_edit(&id) {
                    draft.name = forms::input_text_default("Nom", &draft.name)?;
                    draft.description =
                        forms::input_text_default("Description", &draft.description)?;
                    draft.importance = pick_importance("Importance")?;
                    draft.stakeholders =
                        forms::pick_many("Parties prenantes concernées", &options)?;
                    if let Err(errors) = session.business_values.save_draft(draft) {
                        forms::print_validation_errors(&errors);
                        session.business_values.cancel_edit();
                    }
                }
            }
            ListAction::Remove => {
                let labels: Vec<String> = session
                    .business_values
                    .items()
                    .iter()
                    .map(|bv| bv.name.clone())
                    .collect();
                let idx = forms::select_index("Valeur métier à supprimer", &labels)?;
                let id = session.business_values.items()[idx].id.clone();
                session.business_values.remove(&id);
            }
            ListAction::Done => match session.business_values.submit("valeur métier") {
                Ok(()) => return Ok(()),
                Err(errors) => forms::print_validation_errors(&errors),
            },
        }
    }
}

fn run_security_criteria(session: &mut Session) -> Result<()> {
    loop {
        for c in session.security_criteria.items() {
            println!("  - {} ({})", c.name, c.kind);
        }
        match forms::list_action("critère de sécurité", session.security_criteria.len())? {
            ListAction::Add => {
                let name = forms::input_text("Nom du critère")?;
                let description = forms::input_text("Description")?;
                let kinds = CriterionKind::all();
                let labels: Vec<String> = kinds.iter().map(|k| k.to_string()).collect();
                let idx = forms::select_index("Famille", &labels)?;
                let mut criterion = SecurityCriterion::new(name, description, kinds[idx]);
                if forms::confirm("Décrire l'échelle de niveaux ?", false)? {
                    criterion.scale.low = forms::input_text_optional("Niveau faible")?;
                    criterion.scale.medium = forms::input_text_optional("Niveau moyen")?;
                    criterion.scale.high = forms::input_text_optional("Niveau élevé")?;
                    criterion.scale.critical = forms::input_text_optional("Niveau critique")?;
                }
                if let Err(errors) = session.security_criteria.add(criterion) {
                    forms::print_validation_errors(&errors);
                }
            }
            ListAction::Edit => {
                let labels: Vec<String> = session
                    .security_criteria
                    .items()
                    .iter()
                    .map(|c| c.name.clone())
                    .collect();
                let idx = forms::select_index("Critère à modifier", &labels)?;
                let id = session.security_criteria.items()[idx].id.clone();
                if let Some(mut draft) = session.security_criteria.start_edit(&id) {
                    draft.name = forms::input_text_default("Nom", &draft.name)?;
                    draft.description =
                        forms::input_text_default("Description", &draft.description)?;
                    if let Err(errors) = session.security_criteria.save_draft(draft) {
                        forms::print_validation_errors(&errors);
                        session.security_criteria.cancel_edit();
                    }
                }
            }
            ListAction::Remove => {
                let labels: Vec<String> = session
                    .security_criteria
                    .items()
                    .iter()
                    .map(|c| c.name.clone())
                    .collect();
                let idx = forms::select_index("Critère à supprimer", &labels)?;
                let id = session.security_criteria.items()[idx].id.clone();
                session.security_criteria.remove(&id);
            }
            ListAction::Done => match session.security_criteria.submit("critère de sécurité") {
                Ok(()) => return Ok(()),
                Err(errors) => forms::print_validation_errors(&errors),
            },
        }
    }
}

fn run_security_needs(session: &mut Session) -> Result<()> {
    loop {
        for need in session.security_needs.items() {
            println!(
                "  - {} / {} : {}",
                session.business_value_name(&need.business_value),
                session.criterion_name(&need.criterion),
                need.level
            );
        }
        match forms::list_action("besoin de sécurité", session.security_needs.len())? {
            ListAction::Add => {
                let value_options = business_value_options(session);
                let criterion_options = criterion_options(session);
                let business_value = forms::pick_one("Valeur métier", &value_options)?;
                let criterion = forms::pick_one("Critère", &criterion_options)?;
                let level = pick_importance("Niveau requis")?;
                let justification = forms::input_text("Justification")?;
                let need = SecurityNeed::new(business_value, criterion, level, justification);
                if let Err(errors) = session.security_needs.add(need) {
                    forms::print_validation_errors(&errors);
                }
            }
            ListAction::Edit => {
                let labels: Vec<String> = session
                    .security_needs
                    .items()
                    .iter()
                    .map(|n| n.justification.clone())
                    .collect();
                let idx = forms::select_index("Besoin à modifier", &labels)?;
                let id = session.security_needs.items()[idx].id.clone();
                if let Some(mut draft) = session.security_needs.start_edit(&id) {
                    draft.level = pick_importance("Niveau requis")?;
                    draft.justification =
                        forms::input_text_default("Justification", &draft.justification)?;
                    if let Err(errors) = session.security_needs.save_draft(draft) {
                        forms::print_validation_errors(&errors);
                        session.security_needs.cancel_edit();
                    }
                }
            }
            ListAction::Remove => {
                let labels: Vec<String> = session
                    .security_needs
                    .items()
                    .iter()
                    .map(|n| n.justification.clone())
                    .collect();
                let idx = forms::select_index("Besoin à supprimer", &labels)?;
                let id = session.security_needs.items()[idx].id.clone();
                session.security_needs.remove(&id);
            }
            ListAction::Done => match session.security_needs.submit("besoin de sécurité") {
                Ok(()) => return Ok(()),
                Err(errors) => forms::print_validation_errors(&errors),
            },
        }
    }
}

fn run_scope(session: &mut Session) -> Result<()> {
    loop {
        let description = forms::input_text("Description du périmètre étudié")?;
        let constraints = forms::input_lines("Contrainte")?;
        let assumptions = forms::input_lines("Hypothèse")?;
        let scope = Scope {
            description,
            constraints,
            assumptions,
        };
        let errors = scope.validate();
        if errors.is_empty() {
            session.scope = scope;
            return Ok(());
        }
        forms::print_validation_errors(&errors);
    }
}

fn run_assets(session: &mut Session) -> Result<()> {
    loop {
        for asset in session.assets.items() {
            println!("  - {} ({})", asset.name, asset.kind);
        }
        match forms::list_action("bien support", session.assets.len())? {
            ListAction::Add => {
                let name = forms::input_text("Nom du bien support")?;
                let description = forms::input_text("Description")?;
                let kinds = AssetKind::all();
                let labels: Vec<String> = kinds.iter().map(|k| k.to_string()).collect();
                let idx = forms::select_index("Type de bien", &labels)?;
                let mut asset = Asset::new(name, description, kinds[idx]);
                let options = business_value_options(session);
                asset.business_values =
                    forms::pick_many("Valeurs métier supportées", &options)?;
                if let Err(errors) = session.assets.add(asset) {
                    forms::print_validation_errors(&errors);
                }
            }
            ListAction::Edit => {
                let labels: Vec<String> = session
                    .assets
                    .items()
                    .iter()
                    .map(|a| a.name.clone())
                    .collect();
                let idx = forms::select_index("Bien à modifier", &labels)?;
                let id = session.assets.items()[idx].id.clone();
                if let Some(mut draft) = session.assets.start_edit(&id) {
                    draft.name = forms::input_text_default("Nom", &draft.name)?;
                    draft.description =
                        forms::input_text_default("Description", &draft.description)?;
                    if let Err(errors) = session.assets.save_draft(draft) {
                        forms::print_validation_errors(&errors);
                        session.assets.cancel_edit();
                    }
                }
            }
            ListAction::Remove => {
                let labels: Vec<String> = session
                    .assets
                    .items()
                    .iter()
                    .map(|a| a.name.clone())
                    .collect();
                let idx = forms::select_index("Bien à supprimer", &labels)?;
                let id = session.assets.items()[idx].id.clone();
                session.assets.remove(&id);
            }
            ListAction::Done => match session.assets.submit("bien support") {
                Ok(()) => break,
                Err(errors) => forms::print_validation_errors(&errors),
            },
        }
    }

    // Baseline threat list, free-form
    loop {
        for threat in session.threats.items() {
            println!("  - {}", threat.name);
        }
        match forms::list_action("menace", session.threats.len())? {
            ListAction::Add => {
                let name = forms::input_text("Nom de la menace")?;
                let description = forms::input_text("Description")?;
                if let Err(errors) = session.threats.add(Threat::new(name, description)) {
                    forms::print_validation_errors(&errors);
                }
            }
            ListAction::Edit => {
                let labels: Vec<String> = session
                    .threats
                    .items()
                    .iter()
                    .map(|t| t.name.clone())
                    .collect();
                let idx = forms::select_index("Menace à modifier", &labels)?;
                let id = session.threats.items()[idx].id.clone();
                if let Some(mut draft) = session.threats.start_edit(&id) {
                    draft.name = forms::input_text_default("Nom", &draft.name)?;
                    draft.description =
                        forms::input_text_default("Description", &draft.description)?;
                    if let Err(errors) = session.threats.save_draft(draft) {
                        forms::print_validation_errors(&errors);
                        session.threats.cancel_edit();
                    }
                }
            }
            ListAction::Remove => {
                let labels: Vec<String> = session
                    .threats
                    .items()
                    .iter()
                    .map(|t| t.name.clone())
                    .collect();
                let idx = forms::select_index("Menace à supprimer", &labels)?;
                let id = session.threats.items()[idx].id.clone();
                session.threats.remove(&id);
            }
            ListAction::Done => match session.threats.submit("menace") {
                Ok(()) => return Ok(()),
                Err(errors) => forms::print_validation_errors(&errors),
            },
        }
    }
}

fn pick_importance(prompt: &str) -> Result<Importance> {
    let all = Importance::all();
    let labels: Vec<String> = all.iter().map(|i| i.to_string()).collect();
    let idx = forms::select_index(prompt, &labels)?;
    Ok(all[idx])
}

pub(crate) fn stakeholder_options(session: &Session) -> Vec<(EntityId, String)> {
    session
        .stakeholders
        .items()
        .iter()
        .map(|s| (s.id.clone(), s.name.clone()))
        .collect()
}

pub(crate) fn business_value_options(session: &Session) -> Vec<(EntityId, String)> {
    session
        .business_values
        .items()
        .iter()
        .map(|bv| (bv.id.clone(), bv.name.clone()))
        .collect()
}

fn criterion_options(session: &Session) -> Vec<(EntityId, String)> {
    session
        .security_criteria
        .items()
        .iter()
        .map(|c| (c.id.clone(), c.name.clone()))
        .collect()
}
