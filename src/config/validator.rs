use crate::config::EngineConfig;
use crate::error::{RecollectError, Result, ValidationError};

/// Upper bound for `filters.display_window_days` (ten years)
pub const MAX_DISPLAY_WINDOW_DAYS: u32 = 3650;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration, collecting every problem at once
    pub fn validate(config: &EngineConfig) -> Result<()> {
        let mut errors = Vec::new();

        Self::validate_ranking(config, &mut errors);
        Self::validate_response(config, &mut errors);
        Self::validate_filters(config, &mut errors);
        Self::validate_patterns(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(RecollectError::ConfigValidation { errors })
        }
    }

    fn validate_ranking(config: &EngineConfig, errors: &mut Vec<ValidationError>) {
        let ranking = &config.ranking;

        if !(0.0..1.0).contains(&ranking.relevance_threshold) {
            errors.push(ValidationError::new(
                "ranking.relevance_threshold",
                format!(
                    "Threshold must be in [0.0, 1.0), got {}",
                    ranking.relevance_threshold
                ),
            ));
        }

        for (path, weight) in [
            ("ranking.keyword_weight", ranking.keyword_weight),
            ("ranking.entity_weight", ranking.entity_weight),
        ] {
            if !(0.0..=1.0).contains(&weight) {
                errors.push(ValidationError::new(
                    path,
                    format!("Weight must be between 0.0 and 1.0, got {}", weight),
                ));
            }
        }

        if ranking.max_results == 0 {
            errors.push(ValidationError::new(
                "ranking.max_results",
                "Max results must be greater than 0",
            ));
        }
    }

    fn validate_response(config: &EngineConfig, errors: &mut Vec<ValidationError>) {
        let response = &config.response;

        if !(3..=4).contains(&response.suggestion_count) {
            errors.push(ValidationError::new(
                "response.suggestion_count",
                format!(
                    "Suggestion count must be 3 or 4, got {}",
                    response.suggestion_count
                ),
            ));
        }

        if response.summary_preview_chars == 0 {
            errors.push(ValidationError::new(
                "response.summary_preview_chars",
                "Preview length must be greater than 0",
            ));
        }

        if response.default_preview_chars == 0 {
            errors.push(ValidationError::new(
                "response.default_preview_chars",
                "Preview length must be greater than 0",
            ));
        }

        if response.max_extracted_sentences == 0 {
            errors.push(ValidationError::new(
                "response.max_extracted_sentences",
                "Must extract at least one sentence",
            ));
        }
    }

    fn validate_filters(config: &EngineConfig, errors: &mut Vec<ValidationError>) {
        let days = config.filters.display_window_days;
        if !(1..=MAX_DISPLAY_WINDOW_DAYS).contains(&days) {
            errors.push(ValidationError::new(
                "filters.display_window_days",
                format!(
                    "Display window must be between 1 and {} days, got {}",
                    MAX_DISPLAY_WINDOW_DAYS, days
                ),
            ));
        }
    }

    fn validate_patterns(config: &EngineConfig, errors: &mut Vec<ValidationError>) {
        // Existence is checked when the registry is loaded
        if let Some(path) = &config.patterns_file {
            if path.as_os_str().is_empty() {
                errors.push(ValidationError::new(
                    "patterns_file",
                    "Patterns file path cannot be empty",
                ));
            }
        }
    }
}
