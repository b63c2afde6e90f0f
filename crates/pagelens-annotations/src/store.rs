//! Annotation capture and storage.

use chrono::Utc;
use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use pagelens_config::AnnotationsConfig;
use pagelens_inspect::{element_classes, element_name, element_path, nearby_text};
use pagelens_protocols::{ElementRef, HostPage};

use crate::labeler::SafeLabeler;
use crate::positioner::{anchor_at, anchor_bounding_box, marker_position, MarkerPosition};
use crate::record::Annotation;

/// What the embedder supplies when the user drops an annotation.
#[derive(Debug, Clone, Default)]
pub struct AnnotationRequest {
    pub comment: String,
    /// Click position, viewport coordinates.
    pub point_x: f64,
    pub point_y: f64,
    /// Text the user had selected, if any.
    pub selected_text: Option<String>,
}

/// Ordered collection of annotations plus the capture pipeline.
pub struct AnnotationStore {
    annotations: RwLock<Vec<Annotation>>,
    config: AnnotationsConfig,
    labeler: SafeLabeler,
}

impl AnnotationStore {
    pub fn new(config: AnnotationsConfig, labeler: SafeLabeler) -> Self {
        Self {
            annotations: RwLock::new(Vec::new()),
            config,
            labeler,
        }
    }

    /// Capture a new annotation anchored at the request's click point on
    /// `element`, deriving all descriptive metadata from the live tree.
    pub fn annotate(
        &self,
        element: &ElementRef,
        page: &dyn HostPage,
        request: AnnotationRequest,
    ) -> Annotation {
        let anchor = anchor_at(element, request.point_x, request.point_y, page);
        let bounding_box = anchor_bounding_box(element, anchor.is_fixed, page);

        let selected_text = request
            .selected_text
            .map(|text| {
                text.trim()
                    .chars()
                    .take(self.config.selected_text_limit)
                    .collect::<String>()
            })
            .filter(|text| !text.is_empty());

        let annotation = Annotation {
            id: Uuid::new_v4().to_string(),
            x_percent: anchor.x_percent,
            y: anchor.y,
            comment: request.comment,
            element: element_name(element),
            element_path: element_path(element, self.config.max_path_depth),
            is_fixed: anchor.is_fixed,
            created_at: Utc::now(),
            selected_text,
            bounding_box,
            nearby_text: nearby_text(element),
            css_classes: element_classes(element),
            component: self.labeler.label(element),
        };

        debug!(id = %annotation.id, element = %annotation.element, fixed = annotation.is_fixed, "annotation captured");
        self.annotations.write().push(annotation.clone());
        annotation
    }

    /// All annotations, oldest first.
    pub fn annotations(&self) -> Vec<Annotation> {
        self.annotations.read().clone()
    }

    pub fn get(&self, id: &str) -> Option<Annotation> {
        self.annotations.read().iter().find(|a| a.id == id).cloned()
    }

    /// Delete one annotation. Returns whether it existed.
    pub fn remove(&self, id: &str) -> bool {
        let mut annotations = self.annotations.write();
        let before = annotations.len();
        annotations.retain(|a| a.id != id);
        annotations.len() != before
    }

    pub fn clear(&self) {
        self.annotations.write().clear();
    }

    pub fn len(&self) -> usize {
        self.annotations.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.read().is_empty()
    }

    /// Render positions for every annotation at the page's current scroll
    /// and viewport, oldest first.
    pub fn marker_positions(&self, page: &dyn HostPage) -> Vec<(Annotation, MarkerPosition)> {
        let scroll_y = page.scroll_y();
        let viewport_width = page.viewport_width();
        self.annotations
            .read()
            .iter()
            .map(|a| (a.clone(), marker_position(a, scroll_y, viewport_width)))
            .collect()
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
