//! Configuration validation.

use crate::schema::OverlayConfig;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &OverlayConfig) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_shifts(config, &mut result);
        Self::validate_replay(config, &mut result);
        Self::validate_annotations(config, &mut result);

        result
    }

    fn validate_shifts(config: &OverlayConfig, result: &mut ValidationResult) {
        let threshold = config.shifts.filter_threshold;

        if !threshold.is_finite() || threshold < 0.0 {
            result.add_error(ValidationError::new(
                "shifts.filter_threshold",
                "filter_threshold must be a non-negative finite number",
            ));
        } else if threshold > 0.25 {
            result.add_warning(ValidationWarning::new(
                "shifts.filter_threshold",
                "filter_threshold above 0.25 hides even severe shifts",
            ));
        }
    }

    fn validate_replay(config: &OverlayConfig, result: &mut ValidationResult) {
        if config.replay.hold_ms == 0 {
            result.add_error(ValidationError::new(
                "replay.hold_ms",
                "hold_ms must be greater than 0",
            ));
        }

        if config.replay.move_transition_ms > config.replay.hold_ms {
            result.add_warning(ValidationWarning::new(
                "replay.move_transition_ms",
                "transition outlasts the hold window and will be cut off",
            ));
        }

        if config.replay.fade_transition_ms > config.replay.hold_ms {
            result.add_warning(ValidationWarning::new(
                "replay.fade_transition_ms",
                "fade outlasts the hold window and will be cut off",
            ));
        }
    }

    fn validate_annotations(config: &OverlayConfig, result: &mut ValidationResult) {
        if config.annotations.max_path_depth == 0 {
            result.add_error(ValidationError::new(
                "annotations.max_path_depth",
                "max_path_depth must be greater than 0",
            ));
        }

        if config.annotations.selected_text_limit == 0 {
            result.add_warning(ValidationWarning::new(
                "annotations.selected_text_limit",
                "selected_text_limit of 0 drops all selected text",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
