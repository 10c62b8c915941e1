//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    demo::DemoArgs, run::RunArgs, scales::ScalesArgs, workshops::WorkshopsArgs,
};

#[derive(Parser)]
#[command(name = "atelier")]
#[command(author, version, about = "Atelier RM - guided risk-assessment workshops")]
#[command(
    long_about = "A terminal tool for walking a single analyst through the five EBIOS RM workshops: context framing, risk sources, strategic scenarios, operational scenarios and risk treatment, ending in a summary report."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format for the report
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a guided assessment session (interactive)
    Run(RunArgs),

    /// List the workshop catalog and its steps
    Workshops(WorkshopsArgs),

    /// Show the rating scales and banding thresholds
    Scales(ScalesArgs),

    /// Run a canned sample session and print its report (non-interactive)
    Demo(DemoArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically pick (styled text on a terminal)
    #[default]
    Auto,
    /// Plain styled text
    Text,
    /// YAML (full fidelity)
    Yaml,
    /// JSON (for programming)
    Json,
    /// Markdown tables
    Md,
}
