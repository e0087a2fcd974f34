pub mod rule_store;
pub mod types;

pub use rule_store::SqliteRuleStore;
pub use types::StoredRule;
