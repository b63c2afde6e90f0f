//! Shift engine errors.

use thiserror::Error;

/// Errors surfaced by the shift-detection engine.
#[derive(Debug, Error)]
pub enum ShiftError {
    /// The instability feed is missing, or its subscription was rejected.
    /// Permanent for the session; surfaced as a disabled feature, never
    /// retried.
    #[error("layout instability detection is unsupported on this host")]
    Unsupported,
}
