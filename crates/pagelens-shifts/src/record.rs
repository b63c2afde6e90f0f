//! Accepted shift records.

use serde::Serialize;
use uuid::Uuid;

use pagelens_protocols::{Rect, WeakElementRef};

/// One attributed element movement inside an accepted shift.
///
/// The element reference is a weak back-reference into the host tree; it is
/// never used to keep the element alive, and readers liveness-check it
/// before trusting it over the captured geometry.
#[derive(Debug, Clone, Serialize)]
pub struct ShiftSource {
    #[serde(skip)]
    pub element: Option<WeakElementRef>,

    /// Stable selector path, when one could be derived at capture.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,

    /// Viewport-space geometry before the shift, at capture time.
    pub previous_rect: Rect,

    /// Viewport-space geometry after the shift, at capture time.
    pub current_rect: Rect,
}

/// One accepted instability event. Immutable once created; destroyed only by
/// an explicit store clear or teardown.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutShift {
    pub id: String,

    /// Non-negative score contribution.
    pub value: f64,

    /// Monotonic capture clock, milliseconds.
    pub timestamp: f64,

    pub had_recent_input: bool,

    /// Never empty: an entry whose sources were all filtered away is dropped
    /// instead of being stored.
    pub sources: Vec<ShiftSource>,

    pub description: String,

    /// Document scroll offset at capture.
    pub scroll_y: f64,
}

/// Unique id from the capture clock plus a random fragment.
pub(crate) fn mint_shift_id(now_ms: f64) -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("{}-{}", now_ms.max(0.0) as u64, &random[..7])
}
