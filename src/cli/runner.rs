//! Command execution.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};

use super::commands::{Cli, Selection};
use crate::export::{format_load_order, read_load_order, write_load_order};
use crate::metadata::{index_by_id, read_mods};
use crate::ordering::{LoadOrderEngine, Mod, RuleFinding};
use crate::settings::{default_settings_path, Settings};

/// Holds the engine and settings shared by every subcommand.
pub struct CommandRunner {
    engine: LoadOrderEngine,
    settings: Settings,
}

/// Metadata plus the ids chosen from it.
struct LoadedSelection {
    ids: Vec<String>,
    mods: HashMap<String, Mod>,
}

impl CommandRunner {
    /// Read settings, apply command-line overrides and build the engine.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let settings_path = cli.config.clone().or_else(default_settings_path);
        let mut settings = match settings_path {
            Some(path) => Settings::load(&path)?,
            None => Settings::default(),
        };

        if cli.rules.is_some() {
            settings.rules_path = cli.rules.clone();
        }
        if cli.database.is_some() {
            settings.database_path = cli.database.clone();
        }
        if cli.no_default_rules {
            settings.use_default_rules = false;
        }

        let engine = settings.build_engine()?;
        Ok(Self { engine, settings })
    }

    pub fn engine(&self) -> &LoadOrderEngine {
        &self.engine
    }

    fn load_selection(&self, selection: &Selection) -> Result<LoadedSelection> {
        let records = read_mods(&selection.mods)?;

        let mut ids = selection.ids.clone();
        if let Some(path) = &selection.ids_file {
            ids.extend(
                read_load_order(path)
                    .with_context(|| format!("Failed to read selection from {:?}", path))?,
            );
        }
        if ids.is_empty() {
            ids = records.iter().map(|m| m.id.clone()).collect();
        }

        Ok(LoadedSelection {
            ids,
            mods: index_by_id(&records),
        })
    }

    /// Execute the resolve command.
    ///
    /// Prints ids (or a JSON report) to `out` and exports to `--output` or
    /// the configured export path.
    pub fn run_resolve(
        &self,
        selection: &Selection,
        output: Option<PathBuf>,
        report: bool,
        out: &mut impl std::io::Write,
    ) -> Result<()> {
        let loaded = self.load_selection(selection)?;
        let report_data = self.engine.resolve_report(&loaded.ids, &loaded.mods);

        if !report_data.dropped.is_empty() {
            warn!(
                "{} selected mods have no metadata and were left out: {}",
                report_data.dropped.len(),
                report_data.dropped.join(", ")
            );
        }

        if report {
            serde_json::to_writer_pretty(&mut *out, &report_data)?;
            writeln!(out)?;
        } else {
            out.write_all(format_load_order(&report_data.order).as_bytes())?;
        }

        if let Some(path) = output.or_else(|| self.settings.export_path.clone()) {
            write_load_order(&report_data.order, &path)?;
        }

        info!("Resolved {} mods", report_data.order.len());
        Ok(())
    }

    /// Execute the check command. Returns the number of problems found.
    pub fn run_check(&self, selection: &Selection, out: &mut impl std::io::Write) -> Result<usize> {
        let loaded = self.load_selection(selection)?;
        let conflicts = self.engine.check_conflicts(&loaded.ids);
        let missing = self.engine.check_dependencies(&loaded.ids);

        write_findings(out, "Conflicts", "conflicts with", &conflicts)?;
        write_findings(out, "Missing dependencies", "requires", &missing)?;

        Ok(conflicts.len() + missing.len())
    }

    /// Execute the categorize command.
    pub fn run_categorize(&self, selection: &Selection, out: &mut impl std::io::Write) -> Result<()> {
        let loaded = self.load_selection(selection)?;

        for id in &loaded.ids {
            let Some(m) = loaded.mods.get(id) else {
                writeln!(out, "{}\t<no metadata>", id)?;
                continue;
            };
            let b = self.engine.explain(m);
            match b.override_priority {
                Some(p) => writeln!(out, "{}\t{}\t{}\t(priority rule {})", id, b.category, b.score, p)?,
                None => writeln!(
                    out,
                    "{}\t{}\t{}\t({} + {})",
                    id, b.category, b.score, b.category_weight, b.popularity_bonus
                )?,
            }
        }
        Ok(())
    }
}

fn write_findings(
    out: &mut impl std::io::Write,
    heading: &str,
    verb: &str,
    findings: &[RuleFinding],
) -> Result<()> {
    writeln!(out, "{} ({}):", heading, findings.len())?;
    for f in findings {
        if f.notes.is_empty() {
            writeln!(out, "  {} {} {}", f.mod_id, verb, f.target_mod_id)?;
        } else {
            writeln!(out, "  {} {} {}: {}", f.mod_id, verb, f.target_mod_id, f.notes)?;
        }
    }
    Ok(())
}
