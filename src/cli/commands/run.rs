//! `run` command - the guided assessment session
//!
//! Drives the five workshops in order. A workshop only opens once the
//! previous one is fully complete; the session lives in memory for the
//! duration of the run and ends with the report.

use console::style;
use miette::Result;

use crate::cli::commands::{forms, report, workshop1, workshop2, workshop3, workshop4, workshop5};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::session::Session;
use crate::core::workshop::{workshop, WORKSHOP_COUNT};
use crate::report::{ExportError, Exporter, NoopExporter};

#[derive(clap::Args)]
pub struct RunArgs {
    /// Skip the final report
    #[arg(long)]
    pub no_report: bool,
}

pub fn run(args: RunArgs, global: &GlobalOpts) -> Result<()> {
    let mut session = Session::new();

    loop {
        let id = session.progress.current_workshop();
        let def = workshop(id).ok_or_else(|| miette::miette!("atelier inconnu: {}", id))?;

        if !global.quiet {
            println!();
            println!("{}", style(def.title).bold().cyan().underlined());
            println!("{}", style(def.description).dim());
        }

        debug_assert!(session.progress.can_access_workshop(id));
        match id {
            1 => workshop1::run(&mut session)?,
            2 => workshop2::run(&mut session)?,
            3 => workshop3::run(&mut session)?,
            4 => workshop4::run(&mut session)?,
            5 => workshop5::run(&mut session)?,
            _ => return Err(miette::miette!("atelier inconnu: {}", id)),
        }

        if session.progress.is_workshop_complete(id) {
            if !global.quiet {
                println!("{} {}", style("✓").green().bold(), style(def.title).green());
            }
            if id == WORKSHOP_COUNT {
                break;
            }
            if matches!(global.format, OutputFormat::Auto | OutputFormat::Text)
                && forms::confirm("Afficher le rapport intermédiaire ?", false)?
            {
                report::render(&session, global)?;
            }
            session.progress.next_workshop();
        }
    }

    if !args.no_report {
        report::render(&session, global)?;
        if matches!(global.format, OutputFormat::Auto | OutputFormat::Text)
            && forms::confirm("Générer un export PDF ?", false)?
        {
            offer_export(&NoopExporter);
        }
    }

    Ok(())
}

/// Export failure is surfaced once and never touches the session
fn offer_export(exporter: &dyn Exporter) {
    if let Err(error) = exporter.generate_pdf() {
        let message = match error {
            ExportError::Unavailable => "export non disponible dans cette version".to_string(),
            other => other.to_string(),
        };
        eprintln!("{} {}", style("⚠").yellow().bold(), style(message).yellow());
    }
}
