pub mod cli;
mod error;
pub mod export;
pub mod metadata;
pub mod ordering;
pub mod settings;
pub mod store;

pub use error::ModOrderError;
pub use ordering::{LoadOrderEngine, Mod, Rule, RuleType};

use clap::Parser;
use cli::{Cli, CommandRunner, Commands};

/// Parse arguments, set up logging and run the requested command.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .init();

    let runner = CommandRunner::from_cli(&cli)?;
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Resolve {
            selection,
            output,
            report,
        } => {
            runner.run_resolve(&selection, output, report, &mut stdout)?;
        }
        Commands::Check { selection } => {
            let problems = runner.run_check(&selection, &mut stdout)?;
            if problems > 0 {
                tracing::warn!("{} problems found", problems);
            }
        }
        Commands::Categorize { selection } => {
            runner.run_categorize(&selection, &mut stdout)?;
        }
    }

    Ok(())
}
