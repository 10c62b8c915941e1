use clap::Parser;
use miette::Result;

use atelier::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::Run(args) => atelier::cli::commands::run::run(args, &global),
        Commands::Workshops(args) => atelier::cli::commands::workshops::run(args, &global),
        Commands::Scales(args) => atelier::cli::commands::scales::run(args, &global),
        Commands::Demo(args) => atelier::cli::commands::demo::run(args, &global),
    }
}
