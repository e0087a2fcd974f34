//! Command-line interface.
//!
//! - `resolve` - Print or export the load order for a selection
//! - `check` - Print conflicts and missing dependencies
//! - `categorize` - Print category and score per mod
//!
//! # Usage
//!
//! ```bash
//! # Resolve every mod in mods.json and export it
//! modorder resolve --mods mods.json --output load_order.txt
//!
//! # Resolve a selection with a JSON diagnostic report
//! modorder resolve --mods mods.json --ids 2850232250,880454836 --report
//!
//! # Diagnostics only, with an extra rules file
//! modorder --rules my_rules.toml check --mods mods.json --ids-file selection.txt
//! ```

pub mod commands;
pub mod runner;

pub use commands::{Cli, Commands, Selection};
pub use runner::CommandRunner;
