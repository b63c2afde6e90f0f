//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Root overlay configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverlayConfig {
    #[serde(default)]
    pub shifts: ShiftsConfig,

    #[serde(default)]
    pub replay: ReplayConfig,

    #[serde(default)]
    pub annotations: AnnotationsConfig,
}

/// Layout-shift detection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftsConfig {
    /// Entries scoring below this line are dropped whole.
    #[serde(default = "default_filter_threshold")]
    pub filter_threshold: f64,

    /// Request delivery of entries buffered before the subscription existed.
    #[serde(default = "default_deliver_buffered")]
    pub deliver_buffered: bool,
}

impl Default for ShiftsConfig {
    fn default() -> Self {
        Self {
            filter_threshold: default_filter_threshold(),
            deliver_buffered: default_deliver_buffered(),
        }
    }
}

fn default_filter_threshold() -> f64 {
    0.01
}

fn default_deliver_buffered() -> bool {
    true
}

/// Shift replay configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Overlay markers are removed unconditionally this long after replay
    /// start.
    #[serde(default = "default_hold_ms")]
    pub hold_ms: u64,

    /// Transition applied to the previous-position marker's movement.
    #[serde(default = "default_move_transition_ms")]
    pub move_transition_ms: u64,

    /// Transition applied to the current-position marker's fade-in.
    #[serde(default = "default_fade_transition_ms")]
    pub fade_transition_ms: u64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            hold_ms: default_hold_ms(),
            move_transition_ms: default_move_transition_ms(),
            fade_transition_ms: default_fade_transition_ms(),
        }
    }
}

fn default_hold_ms() -> u64 {
    1500
}

fn default_move_transition_ms() -> u64 {
    500
}

fn default_fade_transition_ms() -> u64 {
    300
}

/// Annotation capture configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationsConfig {
    /// Selected text is truncated to this many characters at capture.
    #[serde(default = "default_selected_text_limit")]
    pub selected_text_limit: usize,

    /// Maximum ancestor depth used when building selector paths.
    #[serde(default = "default_max_path_depth")]
    pub max_path_depth: usize,
}

impl Default for AnnotationsConfig {
    fn default() -> Self {
        Self {
            selected_text_limit: default_selected_text_limit(),
            max_path_depth: default_max_path_depth(),
        }
    }
}

fn default_selected_text_limit() -> usize {
    500
}

fn default_max_path_depth() -> usize {
    4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OverlayConfig::default();
        assert_eq!(config.shifts.filter_threshold, 0.01);
        assert!(config.shifts.deliver_buffered);
        assert_eq!(config.replay.hold_ms, 1500);
        assert_eq!(config.replay.move_transition_ms, 500);
        assert_eq!(config.replay.fade_transition_ms, 300);
        assert_eq!(config.annotations.selected_text_limit, 500);
        assert_eq!(config.annotations.max_path_depth, 4);
    }

    #[test]
    fn test_partial_deserialization_fills_defaults() {
        let config: OverlayConfig =
            serde_json::from_str(r#"{"shifts": {"filter_threshold": 0.1}}"#).unwrap();
        assert_eq!(config.shifts.filter_threshold, 0.1);
        assert!(config.shifts.deliver_buffered);
        assert_eq!(config.replay.hold_ms, 1500);
    }
}
