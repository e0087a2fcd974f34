use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, Row};
use tracing::info;

use super::types::StoredRule;
use crate::error::ModOrderError;
use crate::ordering::{Rule, RuleSource};

/// SQLite store for user-editable load order rules.
/// All operations are synchronous (rusqlite is blocking).
///
/// Rows are returned in insertion order, which is the order the engine
/// applies them in.
pub struct SqliteRuleStore {
    conn: Connection,
    path: PathBuf,
}

const SELECT_COLUMNS: &str =
    "SELECT id, mod_id, rule_type, target_mod_id, priority, source, notes, created_at FROM rules";

fn stored_rule(row: &Row<'_>) -> rusqlite::Result<StoredRule> {
    Ok(StoredRule {
        id: row.get(0)?,
        mod_id: row.get(1)?,
        rule_type: row.get(2)?,
        target_mod_id: row.get(3)?,
        priority: row.get(4)?,
        source: row.get(5)?,
        notes: row.get(6)?,
        created_at: row.get(7)?,
    })
}

impl SqliteRuleStore {
    /// Create or open the rule database at `db_path`.
    pub fn new(db_path: &Path) -> Result<Self, String> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create data dir: {}", e))?;
        }

        let conn = Connection::open(db_path)
            .map_err(|e| format!("Failed to open rule db: {}", e))?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS rules (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                mod_id TEXT NOT NULL,
                rule_type TEXT NOT NULL,
                target_mod_id TEXT,
                priority INTEGER NOT NULL DEFAULT 0,
                source TEXT NOT NULL DEFAULT 'user',
                notes TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            CREATE INDEX IF NOT EXISTS idx_rules_mod ON rules(mod_id);",
        )
        .map_err(|e| format!("Failed to create rules table: {}", e))?;

        info!("Opened rule database at {:?}", db_path);
        Ok(Self {
            conn,
            path: db_path.to_path_buf(),
        })
    }

    /// Append a rule. Returns the row id.
    pub fn insert_rule(&self, rule: &Rule) -> Result<i64, String> {
        self.conn
            .execute(
                "INSERT INTO rules (mod_id, rule_type, target_mod_id, priority, source, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    rule.mod_id,
                    rule.rule_type.as_str(),
                    rule.target_mod_id,
                    rule.priority,
                    rule.source,
                    rule.notes
                ],
            )
            .map_err(|e| format!("Failed to insert rule: {}", e))?;

        let id = self.conn.last_insert_rowid();
        info!(
            "Stored {} rule {} for mod {}",
            rule.rule_type, id, rule.mod_id
        );
        Ok(id)
    }

    /// Delete a rule by id. Returns whether a row was removed.
    pub fn delete_rule(&self, rule_id: i64) -> Result<bool, String> {
        let removed = self
            .conn
            .execute("DELETE FROM rules WHERE id = ?1", params![rule_id])
            .map_err(|e| format!("Failed to delete rule: {}", e))?;
        Ok(removed > 0)
    }

    /// All rows, oldest first.
    pub fn list_rules(&self) -> Result<Vec<StoredRule>, String> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY id ASC", SELECT_COLUMNS))
            .map_err(|e| format!("Failed to prepare query: {}", e))?;

        let rows = stmt
            .query_map([], stored_rule)
            .map_err(|e| format!("Failed to query rules: {}", e))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("Failed to collect rules: {}", e))
    }

    /// Rules whose subject is `mod_id`, oldest first.
    pub fn rules_for_mod(&self, mod_id: &str) -> Result<Vec<Rule>, String> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} WHERE mod_id = ?1 ORDER BY id ASC", SELECT_COLUMNS))
            .map_err(|e| format!("Failed to prepare query: {}", e))?;

        let rows = stmt
            .query_map(params![mod_id], stored_rule)
            .map_err(|e| format!("Failed to query rules: {}", e))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("Failed to collect rules: {}", e))?;

        let mut rules = Vec::with_capacity(rows.len());
        for row in rows {
            rules.push(row.to_rule()?);
        }
        Ok(rules)
    }
}

impl RuleSource for SqliteRuleStore {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load_rules(&self) -> Result<Vec<Rule>, ModOrderError> {
        self.list_rules()
            .map_err(ModOrderError::RuleSource)?
            .iter()
            .map(StoredRule::to_rule)
            .collect()
    }
}
