use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Schema violation in {table} table at `{field}`: {reason}")]
    SchemaViolation { table: &'static str, field: String, reason: String },

    #[error("Table gap in {table} table: no entry for {key}")]
    TableGap { table: &'static str, key: String },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Random source exhausted after {consumed} draws")]
    RandomExhausted { consumed: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl EngineError {
    pub fn schema(table: &'static str, field: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::SchemaViolation { table, field: field.into(), reason: reason.into() }
    }

    pub fn gap(table: &'static str, key: impl Into<String>) -> Self {
        EngineError::TableGap { table, key: key.into() }
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        EngineError::InvalidState(msg.into())
    }

    /// Short identifier used in API responses and logs.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::SchemaViolation { .. } => "SCHEMA_VIOLATION",
            EngineError::TableGap { .. } => "TABLE_GAP",
            EngineError::InvalidState(_) => "INVALID_STATE",
            EngineError::RandomExhausted { .. } => "RANDOM_EXHAUSTED",
            EngineError::Config(_) => "CONFIG",
        }
    }

    /// Every engine error is fatal for the resolution that raised it; only
    /// configuration can be corrected and resubmitted by the caller.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EngineError::Config(_))
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_violation_names_field() {
        let err = EngineError::schema("penalty", "entries[2].yards", "offense penalty must lose yards");
        let msg = err.to_string();
        assert!(msg.contains("penalty"));
        assert!(msg.contains("entries[2].yards"));
        assert_eq!(err.code(), "SCHEMA_VIOLATION");
    }

    #[test]
    fn test_only_config_errors_are_recoverable() {
        assert!(EngineError::Config("bad".into()).is_recoverable());
        assert!(!EngineError::gap("matchup", "run/blitz/7").is_recoverable());
        assert!(!EngineError::RandomExhausted { consumed: 3 }.is_recoverable());
    }
}
