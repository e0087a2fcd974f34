use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModOrderError {
    #[error("Rule source error: {0}")]
    RuleSource(String),

    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<ModOrderError> for String {
    fn from(err: ModOrderError) -> Self {
        err.to_string()
    }
}
