//! Keyword-based mod classification.
//!
//! Classification precedence:
//! 1. Exact id lookup in the known framework / known library tables
//! 2. First category (in declaration order) with a keyword found in the
//!    lowercased `title + tags + description` text
//! 3. `Gameplay`

use super::types::{Category, Mod};

/// Mods that every load order treats as frameworks, keyed by workshop id.
pub const KNOWN_FRAMEWORKS: &[(&str, &str)] = &[
    ("880454836", "Pippi - User & Server Management"),
    ("2850232250", "ModControlPanel"),
    ("2886779102", "Tot ! Custom"),
    ("1797359985", "Kerozard's Paragon Leveling"),
];

/// Mods that mostly provide shared assets and code for addon mods.
pub const KNOWN_LIBRARIES: &[(&str, &str)] = &[
    ("1159180273", "Fashionist"),
    ("1369802940", "Emberlight"),
    ("2305969048", "Age of Calamitous"),
];

/// Keyword lists, walked in order. The first category with any hit wins.
pub const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Framework,
        &["framework", "mod control", "modding api", "core api"],
    ),
    (
        Category::AdminTools,
        &["admin", "moderation", "server tool", "anti-cheat", "cheat menu"],
    ),
    (
        Category::CoreOverrides,
        &["overhaul", "override", "vanilla fix", "bugfix", "rebalance"],
    ),
    (
        Category::Gameplay,
        &["gameplay", "mechanic", "survival", "difficulty", "purge"],
    ),
    (
        Category::Building,
        &["building", "construction", "placement", "furniture", "base"],
    ),
    (
        Category::Items,
        &["item", "weapon", "armor", "clothing", "loot"],
    ),
    (
        Category::Characters,
        &["character", "thrall", "follower", "hairstyle", "npc"],
    ),
    (
        Category::UI,
        &["interface", "hud", "tooltip", "minimap", "inventory ui"],
    ),
    (
        Category::Library,
        &["library", "dependency", "shared code", "resource pack"],
    ),
    (
        Category::Decoration,
        &["decoration", "decor", "cosmetic", "retexture", "texture"],
    ),
];

/// Name of a well-known framework or library mod, if the id is listed.
pub fn known_mod_name(mod_id: &str) -> Option<&'static str> {
    lookup(KNOWN_FRAMEWORKS, mod_id).or_else(|| lookup(KNOWN_LIBRARIES, mod_id))
}

fn lookup(table: &[(&str, &'static str)], mod_id: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(id, _)| *id == mod_id)
        .map(|(_, name)| *name)
}

/// Classify a mod. Pure function of its id, title, tags and description.
pub fn categorize(m: &Mod) -> Category {
    if lookup(KNOWN_FRAMEWORKS, &m.id).is_some() {
        return Category::Framework;
    }
    if lookup(KNOWN_LIBRARIES, &m.id).is_some() {
        return Category::Library;
    }

    let text = format!("{} {} {}", m.title, m.tags.join(" "), m.description).to_lowercase();

    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| text.contains(kw)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Gameplay)
}
