//! Boundary error types.

use thiserror::Error;

/// Instability feed errors.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The feed capability is absent on this host. Permanent for the
    /// session; never retried.
    #[error("layout instability feed is not supported by this host")]
    Unsupported,

    /// Subscription was rejected by the host.
    #[error("feed subscription failed: {0}")]
    Subscribe(String),
}

/// Audit boundary errors.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The engine is not available on this host.
    #[error("audit engine unavailable: {0}")]
    Unavailable(String),

    /// The engine ran and failed.
    #[error("audit run failed: {0}")]
    Engine(String),
}

/// Component-label lookup failure. Consumers degrade to "unknown".
#[derive(Debug, Error)]
#[error("component lookup failed: {0}")]
pub struct LabelError(pub String);
