//! Type definitions for the load-order engine.
//!
//! These types support both TOML/SQLite loading (for rules), JSON
//! deserialization (for mod metadata) and JSON serialization (for the
//! frontend and the CLI report).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModOrderError;

// =============================================================================
// INPUT TYPES (mod metadata, owned by the catalog)
// =============================================================================

/// Metadata for a single mod. The engine never mutates these records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mod {
    /// Opaque stable identifier (usually a workshop id)
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub creator: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub subscriptions: u64,
    /// Raw item-type marker from the catalog ("collection" etc.), unused for ordering
    #[serde(default)]
    pub item_type: Option<String>,
}

impl Mod {
    /// Minimal record with only an id and a title.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            creator: String::new(),
            tags: Vec::new(),
            subscriptions: 0,
            item_type: None,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_subscriptions(mut self, subscriptions: u64) -> Self {
        self.subscriptions = subscriptions;
        self
    }
}

// =============================================================================
// CATEGORIES
// =============================================================================

/// Coarse classification bucket with a fixed base weight.
///
/// Variants are declared highest weight first. The declaration order is the
/// order in which keyword matching is attempted, see [`Category::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Framework,
    AdminTools,
    CoreOverrides,
    Gameplay,
    Building,
    Items,
    Characters,
    #[serde(rename = "ui")]
    UI,
    Library,
    Decoration,
}

impl Category {
    /// Every category, in declaration (and keyword matching) order.
    pub const ALL: [Category; 10] = [
        Category::Framework,
        Category::AdminTools,
        Category::CoreOverrides,
        Category::Gameplay,
        Category::Building,
        Category::Items,
        Category::Characters,
        Category::UI,
        Category::Library,
        Category::Decoration,
    ];

    /// Base priority weight. Higher loads earlier.
    pub fn weight(self) -> i64 {
        match self {
            Category::Framework => 100,
            Category::AdminTools => 90,
            Category::CoreOverrides => 80,
            Category::Gameplay => 70,
            Category::Building => 60,
            Category::Items => 50,
            Category::Characters => 40,
            Category::UI => 30,
            Category::Library => 20,
            Category::Decoration => 10,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Category::Framework => "Framework",
            Category::AdminTools => "Admin Tools",
            Category::CoreOverrides => "Core Overrides",
            Category::Gameplay => "Gameplay",
            Category::Building => "Building",
            Category::Items => "Items",
            Category::Characters => "Characters",
            Category::UI => "UI",
            Category::Library => "Library",
            Category::Decoration => "Decoration",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// =============================================================================
// RULES (loaded from TOML or the SQLite rule store)
// =============================================================================

/// Kind of constraint a rule expresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleType {
    /// `mod_id` needs `target_mod_id` to be enabled
    Requires,
    /// `mod_id` and `target_mod_id` should not be enabled together
    ConflictsWith,
    /// `mod_id` must load before `target_mod_id`
    PlaceBefore,
    /// `mod_id` must load after `target_mod_id`
    PlaceAfter,
    /// Absolute score override for `mod_id`
    Priority,
}

impl RuleType {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleType::Requires => "requires",
            RuleType::ConflictsWith => "conflicts_with",
            RuleType::PlaceBefore => "place_before",
            RuleType::PlaceAfter => "place_after",
            RuleType::Priority => "priority",
        }
    }

    /// Whether a rule of this type is meaningless without a target.
    pub fn needs_target(self) -> bool {
        !matches!(self, RuleType::Priority)
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleType {
    type Err = ModOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "requires" => Ok(RuleType::Requires),
            "conflicts_with" => Ok(RuleType::ConflictsWith),
            "place_before" => Ok(RuleType::PlaceBefore),
            "place_after" => Ok(RuleType::PlaceAfter),
            "priority" => Ok(RuleType::Priority),
            other => Err(ModOrderError::InvalidRule(format!(
                "unknown rule type '{}'",
                other
            ))),
        }
    }
}

fn default_source() -> String {
    "user".to_string()
}

/// A single ordering, priority, conflict or dependency rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Subject of the rule
    pub mod_id: String,
    pub rule_type: RuleType,
    /// Other side of the rule (unused for `priority`)
    #[serde(default)]
    pub target_mod_id: Option<String>,
    /// Score override, only meaningful for `priority` rules
    #[serde(default)]
    pub priority: i64,
    /// Provenance tag ("builtin", "user", "community", ...)
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default)]
    pub notes: String,
}

impl Rule {
    pub fn new(rule_type: RuleType, mod_id: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            mod_id: mod_id.into(),
            rule_type,
            target_mod_id: Some(target.into()),
            priority: 0,
            source: default_source(),
            notes: String::new(),
        }
    }

    pub fn priority(mod_id: impl Into<String>, priority: i64) -> Self {
        Self {
            mod_id: mod_id.into(),
            rule_type: RuleType::Priority,
            target_mod_id: None,
            priority,
            source: default_source(),
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Target id as stored, if set and non-blank.
    pub fn target(&self) -> Option<&str> {
        self.target_mod_id
            .as_deref()
            .filter(|t| !t.trim().is_empty())
    }

    /// A targeted rule type with no target. Every consumer skips these.
    pub fn is_inert(&self) -> bool {
        self.rule_type.needs_target() && self.target().is_none()
    }

    /// `(mod_id, target)` when this rule is a live rule of the given type.
    pub(crate) fn pair(&self, rule_type: RuleType) -> Option<(&str, &str)> {
        if self.rule_type != rule_type {
            return None;
        }
        self.target().map(|target| (self.mod_id.as_str(), target))
    }
}

// =============================================================================
// OUTPUT TYPES (serialized to frontend / CLI)
// =============================================================================

/// A conflict or missing-dependency diagnostic: `(subject, other, notes)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleFinding {
    pub mod_id: String,
    pub target_mod_id: String,
    pub notes: String,
}

/// How a mod's score was derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub mod_id: String,
    pub category: Category,
    pub category_weight: i64,
    pub popularity_bonus: i64,
    /// Set when a priority rule replaced the computed score
    pub override_priority: Option<i64>,
    pub score: i64,
}

/// A placement rule that does not hold in a given order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnsatisfiedPlacement {
    pub rule_type: RuleType,
    pub mod_id: String,
    pub target_mod_id: String,
    pub notes: String,
}

/// Everything a caller needs to render one resolution.
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionReport {
    /// Final load order
    pub order: Vec<String>,
    /// Input ids that had no metadata and were left out of `order`
    pub dropped: Vec<String>,
    pub conflicts: Vec<RuleFinding>,
    pub missing_dependencies: Vec<RuleFinding>,
    /// Placement rules that do not hold in `order`
    pub unsatisfied_placements: Vec<UnsatisfiedPlacement>,
}
