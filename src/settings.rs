//! Engine settings, read from a TOML file.
//!
//! Every field is optional; a missing settings file yields the defaults.
//!
//! ```toml
//! use_default_rules = true
//! rules_path = "/home/me/mods/rules.toml"
//! database_path = "/home/me/.local/share/modorder/rules.db"
//! export_path = "/home/me/ConanSandbox/Mods/modlist.txt"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::ModOrderError;
use crate::ordering::{default_rules, ChainedRuleSource, LoadOrderEngine, TomlRuleSource};
use crate::store::SqliteRuleStore;

const APP_DIR: &str = "modorder";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Include the rules embedded in the binary
    pub use_default_rules: bool,
    /// Extra TOML rules file
    pub rules_path: Option<PathBuf>,
    /// SQLite rule store. Falls back to [`default_database_path`] when that file exists.
    pub database_path: Option<PathBuf>,
    /// Where `resolve` writes the exported load order
    pub export_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            use_default_rules: true,
            rules_path: None,
            database_path: None,
            export_path: None,
        }
    }
}

/// `<data dir>/modorder/rules.db`, e.g. `~/.local/share/modorder/rules.db`.
pub fn default_database_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR).join("rules.db"))
}

/// `<config dir>/modorder/settings.toml`.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("settings.toml"))
}

impl Settings {
    /// Load settings from `path`. A missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self, ModOrderError> {
        if !path.exists() {
            debug!("No settings file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ModOrderError::Config(format!("Failed to read {:?}: {}", path, e)))?;
        let settings: Settings = toml::from_str(&content)
            .map_err(|e| ModOrderError::Config(format!("Invalid settings in {:?}: {}", path, e)))?;

        info!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// The rule database to open, if any.
    ///
    /// An explicitly configured path is always used (and created); the
    /// platform default only when it already exists.
    pub fn effective_database_path(&self) -> Option<PathBuf> {
        match &self.database_path {
            Some(path) => Some(path.clone()),
            None => default_database_path().filter(|p| p.exists()),
        }
    }

    /// Rule sources in application order: embedded defaults, TOML file,
    /// then the SQLite store. Later sources win placement contradictions.
    pub fn rule_sources(&self) -> Result<ChainedRuleSource, ModOrderError> {
        let mut chain = ChainedRuleSource::new();

        if self.use_default_rules {
            chain.push(default_rules());
        }
        if let Some(path) = &self.rules_path {
            chain.push(TomlRuleSource::new(path));
        }
        if let Some(path) = self.effective_database_path() {
            let store = SqliteRuleStore::new(&path).map_err(ModOrderError::RuleSource)?;
            chain.push(store);
        }

        Ok(chain)
    }

    /// Build an engine from the configured rule sources.
    pub fn build_engine(&self) -> Result<LoadOrderEngine, ModOrderError> {
        LoadOrderEngine::new(&self.rule_sources()?)
    }
}
