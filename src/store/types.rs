use serde::Serialize;

use crate::error::ModOrderError;
use crate::ordering::{Rule, RuleType};

/// A rule row as stored, before its `rule_type` has been validated.
#[derive(Debug, Clone, Serialize)]
pub struct StoredRule {
    pub id: i64,
    pub mod_id: String,
    pub rule_type: String,
    pub target_mod_id: Option<String>,
    pub priority: i64,
    pub source: String,
    pub notes: String,
    pub created_at: String,
}

impl StoredRule {
    /// Convert to an engine rule. Fails on an unknown `rule_type`.
    pub fn to_rule(&self) -> Result<Rule, ModOrderError> {
        let rule_type = self.rule_type.parse::<RuleType>().map_err(|_| {
            ModOrderError::InvalidRule(format!(
                "stored rule {} has unknown rule type '{}'",
                self.id, self.rule_type
            ))
        })?;

        Ok(Rule {
            mod_id: self.mod_id.clone(),
            rule_type,
            target_mod_id: self.target_mod_id.clone(),
            priority: self.priority,
            source: self.source.clone(),
            notes: self.notes.clone(),
        })
    }
}
