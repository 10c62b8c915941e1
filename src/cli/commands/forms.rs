//! Shared interactive prompt helpers for the workshop steps
//!
//! Every step is the same loop: show the list, offer add/edit/remove,
//! gate Done on the submit rule. These helpers keep the per-entity
//! step functions down to their field prompts.

use console::style;
use dialoguer::{Confirm, Input, MultiSelect, Select};
use miette::{IntoDiagnostic, Result};

use crate::core::accumulator::ValidationErrors;
use crate::core::identity::EntityId;

pub fn input_text(prompt: &str) -> Result<String> {
    Input::new()
        .with_prompt(prompt)
        .interact_text()
        .into_diagnostic()
}

pub fn input_text_optional(prompt: &str) -> Result<String> {
    Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .into_diagnostic()
}

/// Prompt with the current value as the editable default
pub fn input_text_default(prompt: &str, default: &str) -> Result<String> {
    Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()
        .into_diagnostic()
}

/// Collect free-text entries until a blank line
pub fn input_lines(prompt: &str) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    loop {
        let line: String = Input::new()
            .with_prompt(format!("{} (vide pour terminer)", prompt))
            .allow_empty(true)
            .interact_text()
            .into_diagnostic()?;
        if line.trim().is_empty() {
            return Ok(lines);
        }
        lines.push(line);
    }
}

pub fn input_f64(prompt: &str) -> Result<f64> {
    Input::new()
        .with_prompt(prompt)
        .default(0.0)
        .interact_text()
        .into_diagnostic()
}

/// Prompt for an ISO date (YYYY-MM-DD)
pub fn input_date(prompt: &str) -> Result<chrono::NaiveDate> {
    let raw: String = Input::new()
        .with_prompt(format!("{} (AAAA-MM-JJ)", prompt))
        .validate_with(|value: &String| -> std::result::Result<(), &str> {
            value
                .parse::<chrono::NaiveDate>()
                .map(|_| ())
                .map_err(|_| "date attendue au format AAAA-MM-JJ")
        })
        .interact_text()
        .into_diagnostic()?;
    raw.parse::<chrono::NaiveDate>().into_diagnostic()
}

pub fn confirm(prompt: &str, default: bool) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .into_diagnostic()
}

/// Pick one entry from a fixed label set, returning its index
pub fn select_label(prompt: &str, items: &[&str]) -> Result<usize> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
        .into_diagnostic()
}

/// Pick a rating on a labeled 1-N scale, returning the 1-based rating
pub fn select_rating(prompt: &str, labels: &[&str]) -> Result<u8> {
    let items: Vec<String> = labels
        .iter()
        .enumerate()
        .map(|(i, label)| format!("{} - {}", i + 1, label))
        .collect();
    let idx = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact()
        .into_diagnostic()?;
    Ok((idx + 1) as u8)
}

/// Pick one entry from dynamic labels, returning its index
pub fn select_index(prompt: &str, labels: &[String]) -> Result<usize> {
    Select::new()
        .with_prompt(prompt)
        .items(labels)
        .default(0)
        .interact()
        .into_diagnostic()
}

/// Pick exactly one referenced record
pub fn pick_one(prompt: &str, options: &[(EntityId, String)]) -> Result<EntityId> {
    let labels: Vec<&str> = options.iter().map(|(_, name)| name.as_str()).collect();
    let idx = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()
        .into_diagnostic()?;
    Ok(options[idx].0.clone())
}

/// Pick any number of referenced records
pub fn pick_many(prompt: &str, options: &[(EntityId, String)]) -> Result<Vec<EntityId>> {
    if options.is_empty() {
        return Ok(Vec::new());
    }
    let labels: Vec<&str> = options.iter().map(|(_, name)| name.as_str()).collect();
    let picked = MultiSelect::new()
        .with_prompt(format!("{} (espace pour sélectionner)", prompt))
        .items(&labels)
        .interact()
        .into_diagnostic()?;
    Ok(picked.into_iter().map(|i| options[i].0.clone()).collect())
}

/// Print validation failures without aborting the step
pub fn print_validation_errors(errors: &ValidationErrors) {
    for (field, message) in errors.iter() {
        eprintln!("  {} {}: {}", style("✗").red(), style(field).bold(), message);
    }
}

/// What the analyst wants to do next with the step's list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    Add,
    Edit,
    Remove,
    Done,
}

/// Step menu. Edit/remove only offered when the list is non-empty.
pub fn list_action(noun: &str, count: usize) -> Result<ListAction> {
    let (items, actions): (Vec<String>, Vec<ListAction>) = if count == 0 {
        (
            vec![format!("Ajouter une entrée ({})", noun), "Terminer l'étape".to_string()],
            vec![ListAction::Add, ListAction::Done],
        )
    } else {
        (
            vec![
                format!("Ajouter une entrée ({})", noun),
                "Modifier une entrée".to_string(),
                "Supprimer une entrée".to_string(),
                "Terminer l'étape".to_string(),
            ],
            vec![
                ListAction::Add,
                ListAction::Edit,
                ListAction::Remove,
                ListAction::Done,
            ],
        )
    };
    let idx = Select::new()
        .with_prompt("Action")
        .items(&items)
        .default(0)
        .interact()
        .into_diagnostic()?;
    Ok(actions[idx])
}
