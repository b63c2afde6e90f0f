//! Facade errors.

use thiserror::Error;

/// Errors surfaced by the overlay facade.
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error(transparent)]
    Config(#[from] pagelens_config::ConfigError),

    #[error(transparent)]
    Shift(#[from] pagelens_shifts::ShiftError),

    /// Replay was requested for an id the store does not hold.
    #[error("no stored shift with id {0}")]
    ShiftNotFound(String),

    #[error(transparent)]
    Audit(#[from] pagelens_protocols::AuditError),
}
