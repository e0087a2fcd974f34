//! CLI definitions (clap derive).

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Resolve mod selections into a load order.
#[derive(Parser, Debug)]
#[command(name = "modorder")]
#[command(version, about = "Mod load order resolver")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    /// Settings file (defaults to <config dir>/modorder/settings.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Extra TOML rules file, overrides the settings file
    #[arg(long)]
    pub rules: Option<PathBuf>,

    /// SQLite rule database, overrides the settings file
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Leave out the built-in rules
    #[arg(long)]
    pub no_default_rules: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Mod metadata and the selection to work on.
#[derive(Args, Debug, Clone)]
pub struct Selection {
    /// JSON array of mod records
    #[arg(short, long)]
    pub mods: PathBuf,

    /// Comma-separated mod ids (defaults to every mod in the metadata file)
    #[arg(short, long, value_delimiter = ',')]
    pub ids: Vec<String>,

    /// File with one mod id per line, appended after --ids
    #[arg(long)]
    pub ids_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the selection and print (or export) the load order
    Resolve {
        #[command(flatten)]
        selection: Selection,

        /// Write the load order to this file (one id per line)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print a JSON report with diagnostics instead of plain ids
        #[arg(long)]
        report: bool,
    },

    /// Print conflicts and missing dependencies for the selection
    Check {
        #[command(flatten)]
        selection: Selection,
    },

    /// Print category and score for every selected mod
    Categorize {
        #[command(flatten)]
        selection: Selection,
    },
}
