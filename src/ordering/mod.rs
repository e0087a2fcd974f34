//! Mod load-order engine.
//!
//! This module turns a selection of mod ids into a single linear load order
//! using category heuristics, explicit precedence rules, and
//! conflict/dependency diagnostics from a rule store.
//!
//! # Architecture
//!
//! - **Rules**: Snapshotted once from a [`RuleSource`] (embedded defaults, TOML
//!   file, SQLite store) when the engine is built
//! - **Categorizer**: Known-id tables, then first-match keyword search
//! - **Scorer**: Category weight + popularity bonus, unless a priority rule
//!   overrides it
//! - **Resolver**: Stable sort by score, then placement rules applied in
//!   stored order as single relocations (last rule wins)
//! - **Constraints**: Conflicts and missing dependencies, reported in rule order
//!
//! # Example
//!
//! ```ignore
//! use modorder::ordering::{default_rules, LoadOrderEngine, Mod};
//!
//! let engine = LoadOrderEngine::new(&default_rules())?;
//!
//! let mods = std::collections::HashMap::from([
//!     ("2850232250".to_string(), Mod::new("2850232250", "ModControlPanel")),
//!     ("123".to_string(), Mod::new("123", "Better HUD")),
//! ]);
//!
//! let order = engine.resolve(&["123", "2850232250"], &mods);
//! assert_eq!(order, vec!["2850232250", "123"]);
//!
//! for conflict in engine.check_conflicts(&order) {
//!     println!("{} conflicts with {}: {}",
//!         conflict.mod_id, conflict.target_mod_id, conflict.notes);
//! }
//! ```

mod categorizer;
mod constraints;
mod engine;
mod resolver;
mod rules;
mod scorer;
mod types;

pub use categorizer::{categorize, known_mod_name, CATEGORY_KEYWORDS, KNOWN_FRAMEWORKS, KNOWN_LIBRARIES};
pub use constraints::{check_conflicts, check_dependencies};
pub use engine::{LoadOrderEngine, RuleSnapshot};
pub use resolver::{apply_placements, resolve, unsatisfied_placements};
pub use rules::{default_rules, load_rules, ChainedRuleSource, RuleSource, RulesConfig, TomlRuleSource};
pub use scorer::{explain, popularity_bonus, priority_override, score};
pub use types::*;
