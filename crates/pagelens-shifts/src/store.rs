//! Append-only shift log with derived cumulative score.

use parking_lot::RwLock;
use serde::Serialize;

use crate::record::LayoutShift;

/// Rating bucket for a cumulative score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClsRating {
    Good,
    NeedsImprovement,
    Poor,
}

impl ClsRating {
    /// Bucket a cumulative score. Comparisons are strict at both lines.
    pub fn from_score(score: f64) -> Self {
        if score < 0.1 {
            ClsRating::Good
        } else if score < 0.25 {
            ClsRating::NeedsImprovement
        } else {
            ClsRating::Poor
        }
    }
}

impl std::fmt::Display for ClsRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClsRating::Good => write!(f, "good"),
            ClsRating::NeedsImprovement => write!(f, "needs-improvement"),
            ClsRating::Poor => write!(f, "poor"),
        }
    }
}

/// Ordered log of accepted shifts.
///
/// Arrival order is chronological because the feed delivers in chronological
/// order. Records leave the store only through [`ShiftStore::clear`].
#[derive(Default)]
pub struct ShiftStore {
    shifts: RwLock<Vec<LayoutShift>>,
}

impl ShiftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one accepted shift.
    pub fn append(&self, shift: LayoutShift) {
        self.shifts.write().push(shift);
    }

    /// All stored shifts, oldest first.
    pub fn shifts(&self) -> Vec<LayoutShift> {
        self.shifts.read().clone()
    }

    /// Shifts scoring at least `threshold`, oldest first. Mirrors the
    /// severity filter in shift readouts.
    pub fn shifts_at_least(&self, threshold: f64) -> Vec<LayoutShift> {
        self.shifts
            .read()
            .iter()
            .filter(|s| s.value >= threshold)
            .cloned()
            .collect()
    }

    /// Look up one shift by id.
    pub fn get(&self, id: &str) -> Option<LayoutShift> {
        self.shifts.read().iter().find(|s| s.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.shifts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shifts.read().is_empty()
    }

    /// Drop every stored shift.
    pub fn clear(&self) {
        self.shifts.write().clear();
    }

    /// Sum of all stored shift values.
    pub fn cumulative_cls(&self) -> f64 {
        self.shifts.read().iter().map(|s| s.value).sum()
    }

    /// Rating bucket of the cumulative score.
    pub fn rating(&self) -> ClsRating {
        ClsRating::from_score(self.cumulative_cls())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shift(id: &str, value: f64) -> LayoutShift {
        LayoutShift {
            id: id.to_string(),
            value,
            timestamp: 0.0,
            had_recent_input: false,
            sources: Vec::new(),
            description: "element shifted".to_string(),
            scroll_y: 0.0,
        }
    }

    #[test]
    fn test_rating_boundaries() {
        assert_eq!(ClsRating::from_score(0.0), ClsRating::Good);
        assert_eq!(ClsRating::from_score(0.0999), ClsRating::Good);
        assert_eq!(ClsRating::from_score(0.10), ClsRating::NeedsImprovement);
        assert_eq!(ClsRating::from_score(0.25), ClsRating::NeedsImprovement);
        assert_eq!(ClsRating::from_score(0.2501), ClsRating::Poor);
    }

    #[test]
    fn test_rating_display() {
        assert_eq!(ClsRating::Good.to_string(), "good");
        assert_eq!(
            ClsRating::NeedsImprovement.to_string(),
            "needs-improvement"
        );
        assert_eq!(ClsRating::Poor.to_string(), "poor");
    }

    #[test]
    fn test_cumulative_equals_sum() {
        let store = ShiftStore::new();
        store.append(shift("a", 0.02));
        store.append(shift("b", 0.03));
        store.append(shift("c", 0.07));

        let total: f64 = store.shifts().iter().map(|s| s.value).sum();
        assert!((store.cumulative_cls() - total).abs() < f64::EPSILON);
        assert!((store.cumulative_cls() - 0.12).abs() < 1e-9);
        assert_eq!(store.rating(), ClsRating::NeedsImprovement);
    }

    #[test]
    fn test_arrival_order_preserved() {
        let store = ShiftStore::new();
        store.append(shift("first", 0.01));
        store.append(shift("second", 0.01));

        let ids: Vec<String> = store.shifts().iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn test_threshold_view() {
        let store = ShiftStore::new();
        store.append(shift("small", 0.005));
        store.append(shift("big", 0.3));

        let severe = store.shifts_at_least(0.25);
        assert_eq!(severe.len(), 1);
        assert_eq!(severe[0].id, "big");
        // The underlying log is untouched.
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_clear_resets_score() {
        let store = ShiftStore::new();
        store.append(shift("a", 0.4));
        assert_eq!(store.rating(), ClsRating::Poor);

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.cumulative_cls(), 0.0);
        assert_eq!(store.rating(), ClsRating::Good);
    }

    #[test]
    fn test_get_by_id() {
        let store = ShiftStore::new();
        store.append(shift("a", 0.1));
        assert!(store.get("a").is_some());
        assert!(store.get("zzz").is_none());
    }
}
