//! Configuration errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Configuration rejected: {0}")]
    Rejected(String),
}

impl ConfigError {
    /// Build an `InvalidValue` error.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value_display() {
        let err = ConfigError::invalid("shifts.filter_threshold", "must be finite");
        let display = err.to_string();
        assert!(display.contains("shifts.filter_threshold"));
        assert!(display.contains("must be finite"));
    }

    #[test]
    fn test_rejected_display() {
        let err = ConfigError::Rejected("2 errors".to_string());
        assert!(err.to_string().contains("2 errors"));
    }
}
