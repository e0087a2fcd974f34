//! The load-order engine.
//!
//! `LoadOrderEngine` owns an immutable rule snapshot taken from a
//! [`RuleSource`] at construction and exposes classification, scoring,
//! diagnostics and resolution over it. Every query is a pure function of its
//! arguments and the snapshot.

use std::collections::{HashMap, HashSet};

use tracing::{info, warn};

use super::categorizer::categorize;
use super::constraints::{check_conflicts, check_dependencies};
use super::resolver::{resolve, unsatisfied_placements};
use super::rules::RuleSource;
use super::scorer::{explain, score};
use super::types::*;
use crate::error::ModOrderError;

/// Rules validated and frozen at engine construction.
#[derive(Debug, Clone, Default)]
pub struct RuleSnapshot {
    rules: Vec<Rule>,
}

impl RuleSnapshot {
    /// Validate rules eagerly. Targetless rules are kept (and ignored later);
    /// a blank `mod_id` is rejected.
    pub fn new(rules: Vec<Rule>) -> Result<Self, ModOrderError> {
        let mut inert = 0;
        for (index, rule) in rules.iter().enumerate() {
            if rule.mod_id.trim().is_empty() {
                return Err(ModOrderError::InvalidRule(format!(
                    "rule #{} ({}) has an empty mod_id",
                    index, rule.rule_type
                )));
            }
            if rule.is_inert() {
                inert += 1;
            }
        }
        if inert > 0 {
            warn!("{} rules have no target and will be ignored", inert);
        }
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Resolves mod selections into load orders against a fixed rule snapshot.
#[derive(Debug, Clone, Default)]
pub struct LoadOrderEngine {
    snapshot: RuleSnapshot,
}

impl LoadOrderEngine {
    /// Take a snapshot from `source`. Fails if the source cannot be read or
    /// holds a malformed rule.
    pub fn new(source: &dyn RuleSource) -> Result<Self, ModOrderError> {
        let snapshot = RuleSnapshot::new(source.load_rules()?)?;
        info!(
            "Load order engine ready with {} rules from {}",
            snapshot.len(),
            source.describe()
        );
        Ok(Self { snapshot })
    }

    /// Engine over an in-memory rule list.
    pub fn from_rules(rules: Vec<Rule>) -> Result<Self, ModOrderError> {
        Self::new(&rules)
    }

    /// Replace the snapshot with a fresh one from `source`.
    ///
    /// On failure the previous snapshot is kept.
    pub fn reload(&mut self, source: &dyn RuleSource) -> Result<(), ModOrderError> {
        let snapshot = RuleSnapshot::new(source.load_rules()?)?;
        info!(
            "Reloaded {} rules from {} (was {})",
            snapshot.len(),
            source.describe(),
            self.snapshot.len()
        );
        self.snapshot = snapshot;
        Ok(())
    }

    pub fn rules(&self) -> &[Rule] {
        self.snapshot.rules()
    }

    pub fn categorize(&self, m: &Mod) -> Category {
        categorize(m)
    }

    pub fn score(&self, m: &Mod) -> i64 {
        score(m, self.rules())
    }

    pub fn explain(&self, m: &Mod) -> ScoreBreakdown {
        explain(m, self.rules())
    }

    pub fn check_conflicts<S: AsRef<str>>(&self, ids: &[S]) -> Vec<RuleFinding> {
        check_conflicts(self.rules(), ids)
    }

    pub fn check_dependencies<S: AsRef<str>>(&self, ids: &[S]) -> Vec<RuleFinding> {
        check_dependencies(self.rules(), ids)
    }

    pub fn resolve<S: AsRef<str>>(&self, ids: &[S], mods: &HashMap<String, Mod>) -> Vec<String> {
        resolve(self.rules(), ids, mods)
    }

    pub fn unsatisfied_placements<S: AsRef<str>>(&self, order: &[S]) -> Vec<UnsatisfiedPlacement> {
        unsatisfied_placements(self.rules(), order)
    }

    /// Input ids with no metadata, in input order, each listed once.
    pub fn missing_metadata<S: AsRef<str>>(
        &self,
        ids: &[S],
        mods: &HashMap<String, Mod>,
    ) -> Vec<String> {
        let mut seen = HashSet::new();
        ids.iter()
            .map(AsRef::as_ref)
            .filter(|id| !mods.contains_key(*id) && seen.insert(*id))
            .map(str::to_string)
            .collect()
    }

    /// Resolve `ids` and gather every diagnostic for the selection.
    ///
    /// Conflicts and dependencies are checked against the full selection,
    /// including ids that were dropped for lack of metadata.
    pub fn resolve_report<S: AsRef<str>>(
        &self,
        ids: &[S],
        mods: &HashMap<String, Mod>,
    ) -> ResolutionReport {
        let order = self.resolve(ids, mods);
        let unsatisfied_placements = self.unsatisfied_placements(&order);

        ResolutionReport {
            dropped: self.missing_metadata(ids, mods),
            conflicts: self.check_conflicts(ids),
            missing_dependencies: self.check_dependencies(ids),
            unsatisfied_placements,
            order,
        }
    }
}
