//! Component-label capability.
//!
//! Optional cosmetic enrichment: deriving the owning UI-component name for an
//! element. Implementations wrap framework internals and may fail in
//! arbitrary ways; consumers treat every failure as "unknown". The
//! coordinate and scoring core never depends on this trait.

use crate::element::ElementRef;
use crate::error::LabelError;

/// Derives UI-component names for display purposes only.
pub trait ComponentLabeler: Send + Sync {
    /// Owning component name for `element`, when one can be derived.
    fn component_name(&self, element: &ElementRef) -> Result<Option<String>, LabelError>;

    /// Enclosing component names, innermost first.
    fn component_hierarchy(&self, element: &ElementRef) -> Result<Vec<String>, LabelError> {
        let _ = element;
        Ok(Vec::new())
    }
}
