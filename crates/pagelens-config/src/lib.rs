//! # Pagelens Config
//!
//! Configuration for the pagelens overlay. Config is supplied
//! programmatically at mount time; there are no config files and nothing is
//! persisted.

pub mod error;
pub mod schema;
pub mod validator;

pub use error::ConfigError;
pub use schema::{AnnotationsConfig, OverlayConfig, ReplayConfig, ShiftsConfig};
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
