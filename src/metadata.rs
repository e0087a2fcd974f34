use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

use crate::ordering::Mod;

/// Read mod metadata from a JSON array of mod records.
///
/// File order is preserved so callers can use it as a default selection.
pub fn read_mods(path: &Path) -> Result<Vec<Mod>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read mod metadata from {:?}", path))?;
    let mods: Vec<Mod> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid mod metadata in {:?}", path))?;

    debug!("Read {} mods from {:?}", mods.len(), path);
    Ok(mods)
}

/// Index mods by id. A repeated id keeps its first record.
pub fn index_by_id(mods: &[Mod]) -> HashMap<String, Mod> {
    let mut by_id = HashMap::with_capacity(mods.len());
    for m in mods {
        if by_id.contains_key(&m.id) {
            warn!("Duplicate metadata for mod {}, keeping the first record", m.id);
            continue;
        }
        by_id.insert(m.id.clone(), m.clone());
    }
    by_id
}
