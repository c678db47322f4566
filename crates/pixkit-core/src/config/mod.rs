//! Configuration management for Pixkit.
//!
//! Configuration is loaded from `~/.pixkit/config.toml` with sensible defaults.
//! Every config struct implements `Default`, so a missing file or a missing
//! section simply falls back to the built-in values.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for Pixkit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Surface and export defaults
    pub image: ImageConfig,

    /// Resource limits
    pub limits: LimitsConfig,

    /// Identifier generation settings
    pub ids: IdConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.pixkit.pixkit/config.toml
    /// - Linux: ~/.config/pixkit/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\pixkit\config\config.toml
    ///
    /// Falls back to ~/.pixkit/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "pixkit", "pixkit")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".pixkit").join("config.toml")
            })
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.image.default_type, "image/jpeg");
        assert_eq!(config.image.surface_width, 300);
        assert_eq!(config.image.surface_height, 150);
        assert_eq!(config.limits.max_file_size_mb, 100);
        assert_eq!(config.ids.digit_count, 16);
    }

    #[test]
    fn test_config_to_toml() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[image]"));
        assert!(toml.contains("[limits]"));
        assert!(toml.contains("[ids]"));
    }

    #[test]
    fn test_load_from_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[image]\ndefault_type = \"image/png\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.image.default_type, "image/png");
        assert!((config.image.default_quality - 0.6).abs() < f32::EPSILON);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ids]\nshort_alphabet = \"abc\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("short_alphabet"));
    }

    #[test]
    fn test_load_from_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[image\n").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ParseError(_))
        ));
    }
}
