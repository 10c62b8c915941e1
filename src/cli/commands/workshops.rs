//! `workshops` command - list the fixed workshop catalog

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::workshop::WORKSHOPS;

#[derive(clap::Args)]
pub struct WorkshopsArgs {}

#[derive(Serialize)]
struct CatalogEntry {
    id: u8,
    title: &'static str,
    description: &'static str,
    steps: &'static [&'static str],
}

fn build() -> Vec<CatalogEntry> {
    WORKSHOPS
        .iter()
        .map(|w| CatalogEntry {
            id: w.id,
            title: w.title,
            description: w.description,
            steps: w.steps,
        })
        .collect()
}

pub fn run(_args: WorkshopsArgs, global: &GlobalOpts) -> Result<()> {
    let catalog = build();

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&catalog).into_diagnostic()?
            );
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&catalog).into_diagnostic()?);
        }
        OutputFormat::Md => {
            for entry in &catalog {
                println!("## {}", entry.title);
                println!();
                println!("{}", entry.description);
                println!();
                for (i, step) in entry.steps.iter().enumerate() {
                    println!("{}. {}", i + 1, step);
                }
                println!();
            }
        }
        OutputFormat::Auto | OutputFormat::Text => {
            for entry in &catalog {
                println!("{}", style(entry.title).bold().cyan());
                if !global.quiet {
                    println!("  {}", style(entry.description).dim());
                }
                for (i, step) in entry.steps.iter().enumerate() {
                    println!("  {}. {}", i + 1, step);
                }
                println!();
            }
            println!(
                "{} atelier(s), progression strictement séquentielle.",
                style(catalog.len()).cyan()
            );
        }
    }

    Ok(())
}
