//! Exception-safe component-label lookup.

use std::sync::Arc;

use tracing::warn;

use pagelens_protocols::{ComponentLabeler, ElementRef, LabelError};

/// Wraps an optional [`ComponentLabeler`] so that any failure reads as
/// "unknown" and is logged, never propagated. The scoring and coordinate
/// core never sees this type.
#[derive(Clone, Default)]
pub struct SafeLabeler {
    inner: Option<Arc<dyn ComponentLabeler>>,
}

impl SafeLabeler {
    pub fn new(inner: Option<Arc<dyn ComponentLabeler>>) -> Self {
        Self { inner }
    }

    /// A labeler that always answers "unknown".
    pub fn none() -> Self {
        Self { inner: None }
    }

    /// Component name for `element`; `None` means unknown.
    pub fn label(&self, element: &ElementRef) -> Option<String> {
        let labeler = self.inner.as_ref()?;
        match labeler.component_name(element) {
            Ok(name) => name,
            Err(error) => {
                warn!(%error, "component labeler failed; treating as unknown");
                None
            }
        }
    }
}

/// Labeler that knows nothing. Useful as an explicit default.
pub struct NullLabeler;

impl ComponentLabeler for NullLabeler {
    fn component_name(&self, _element: &ElementRef) -> Result<Option<String>, LabelError> {
        Ok(None)
    }
}
