//! Annotation records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pagelens_protocols::Rect;

/// One annotation pinned to a point on the page.
///
/// `x_percent` is captured once and never re-derived. `y` is document-space
/// unless `is_fixed`, in which case it is viewport-space; rendering applies
/// the scroll correction from the stored flag only and never re-detects
/// fixedness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Annotation {
    pub id: String,

    /// Horizontal anchor as a percentage of viewport width.
    pub x_percent: f64,

    /// Vertical anchor; frame depends on `is_fixed`.
    pub y: f64,

    pub comment: String,

    /// Human-readable element name at capture time.
    pub element: String,

    /// Bounded-depth selector path at capture time.
    pub element_path: String,

    /// Whether the anchored element was scroll-exempt at capture.
    pub is_fixed: bool,

    pub created_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_text: Option<String>,

    /// Element bounds at capture; same frame rule as `y`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<Rect>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearby_text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_classes: Option<String>,

    /// Owning UI-component name, when the labeler produced one. Cosmetic
    /// only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
}
