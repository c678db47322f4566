//! Configuration validation with range checks.

use crate::error::ConfigError;
use crate::ids::MIN_ALPHABET_LEN;

use super::Config;

/// Levels accepted by `logging.level`.
const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.image.default_quality) {
            return Err(ConfigError::ValidationError(
                "image.default_quality must be between 0.0 and 1.0".into(),
            ));
        }
        if self.image.default_type.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "image.default_type must not be empty".into(),
            ));
        }
        if self.image.surface_width == 0 || self.image.surface_height == 0 {
            return Err(ConfigError::ValidationError(
                "image.surface_width and image.surface_height must be > 0".into(),
            ));
        }
        if self.limits.max_file_size_mb == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_file_size_mb must be > 0".into(),
            ));
        }
        if self.limits.max_image_dimension == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_image_dimension must be > 0".into(),
            ));
        }
        if self.ids.short_alphabet.chars().count() < MIN_ALPHABET_LEN {
            return Err(ConfigError::ValidationError(format!(
                "ids.short_alphabet must contain at least {MIN_ALPHABET_LEN} characters"
            )));
        }
        if self.ids.digit_count == 0 {
            return Err(ConfigError::ValidationError(
                "ids.digit_count must be > 0".into(),
            ));
        }
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level must be one of {}",
                LOG_LEVELS.join(", ")
            )));
        }
        if self.logging.format != "pretty" && self.logging.format != "json" {
            return Err(ConfigError::ValidationError(
                "logging.format must be \"pretty\" or \"json\"".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_quality() {
        let mut config = Config::default();
        config.image.default_quality = 1.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("default_quality"));

        config.image.default_quality = -0.1;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("default_quality"));
    }

    #[test]
    fn test_validate_rejects_zero_surface() {
        let mut config = Config::default();
        config.image.surface_height = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("surface_height"));
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let mut config = Config::default();
        config.limits.max_image_dimension = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_image_dimension"));
    }

    #[test]
    fn test_validate_rejects_short_alphabet() {
        let mut config = Config::default();
        config.ids.short_alphabet = "0123456789abcde".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("short_alphabet"));
    }

    #[test]
    fn test_validate_rejects_unknown_log_level() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("logging.level"));

        for level in LOG_LEVELS {
            config.logging.level = level.to_string();
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn test_validate_rejects_unknown_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("logging.format"));
    }
}
