//! Rule sources for the load-order engine.
//!
//! Provides three loading methods:
//! - `default_rules()` - Loads embedded rules compiled into the binary
//! - `load_rules(path)` - Loads custom rules from a TOML file
//! - [`crate::store::SqliteRuleStore`] - Rules edited by the user at runtime
//!
//! All of them implement [`RuleSource`], which the engine reads exactly once
//! at construction.

use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use super::types::Rule;
use crate::error::ModOrderError;

/// Default rules embedded in the binary at compile time.
/// These are loaded from `config/default_rules.toml`.
const DEFAULT_RULES: &str = include_str!("../../config/default_rules.toml");

/// Root of a rules TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub rules: Vec<Rule>,
}

/// Anything the engine can take a rule snapshot from.
pub trait RuleSource {
    /// Short human-readable origin, used in logs.
    fn describe(&self) -> String;

    /// All rules, in stored order.
    fn load_rules(&self) -> Result<Vec<Rule>, ModOrderError>;
}

impl RuleSource for Vec<Rule> {
    fn describe(&self) -> String {
        "in-memory rules".to_string()
    }

    fn load_rules(&self) -> Result<Vec<Rule>, ModOrderError> {
        Ok(self.clone())
    }
}

impl RuleSource for RulesConfig {
    fn describe(&self) -> String {
        "rules config".to_string()
    }

    fn load_rules(&self) -> Result<Vec<Rule>, ModOrderError> {
        Ok(self.rules.clone())
    }
}

/// A TOML rules file, read when the snapshot is taken.
#[derive(Debug, Clone)]
pub struct TomlRuleSource {
    path: PathBuf,
}

impl TomlRuleSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RuleSource for TomlRuleSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load_rules(&self) -> Result<Vec<Rule>, ModOrderError> {
        load_rules(&self.path)
            .map(|config| config.rules)
            .map_err(|e| {
                ModOrderError::RuleSource(format!(
                    "Failed to load rules from {}: {:#}",
                    self.path.display(),
                    e
                ))
            })
    }
}

/// Several sources read one after another; rules keep source order.
#[derive(Default)]
pub struct ChainedRuleSource {
    sources: Vec<Box<dyn RuleSource>>,
}

impl ChainedRuleSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, source: impl RuleSource + 'static) {
        self.sources.push(Box::new(source));
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl RuleSource for ChainedRuleSource {
    fn describe(&self) -> String {
        if self.sources.is_empty() {
            return "no rule sources".to_string();
        }
        self.sources
            .iter()
            .map(|s| s.describe())
            .collect::<Vec<_>>()
            .join(" + ")
    }

    fn load_rules(&self) -> Result<Vec<Rule>, ModOrderError> {
        let mut rules = Vec::new();
        for source in &self.sources {
            rules.extend(source.load_rules()?);
        }
        Ok(rules)
    }
}

/// Load rules from a TOML file at the given path.
///
/// Unknown `rule_type` values fail here rather than at resolution time.
pub fn load_rules(path: &Path) -> Result<RulesConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: RulesConfig = toml::from_str(&content)?;
    info!("Loaded {} rules from {:?}", config.rules.len(), path);
    Ok(config)
}

/// Get the default rules embedded in the binary.
///
/// These cover dependencies and placement for well-known framework and
/// library mods.
///
/// # Panics
/// Panics if the embedded TOML is invalid (this would be a compile-time bug).
pub fn default_rules() -> RulesConfig {
    toml::from_str(DEFAULT_RULES).expect("embedded default_rules.toml must be valid TOML")
}
