//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};

use crate::pipeline::Encoding;

/// Default alphabet for short identifiers: digits, lower and upper case letters.
pub const DEFAULT_SHORT_ALPHABET: &str =
    "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Surface and export defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// MIME type used when an export does not name one
    pub default_type: String,

    /// Encoder quality in [0, 1] used when an export does not name one
    pub default_quality: f32,

    /// Width of a freshly created drawing surface
    pub surface_width: u32,

    /// Height of a freshly created drawing surface
    pub surface_height: u32,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            default_type: "image/jpeg".to_string(),
            default_quality: 0.6,
            surface_width: 300,
            surface_height: 150,
        }
    }
}

impl ImageConfig {
    /// The export encoding described by this config.
    pub fn encoding(&self) -> Encoding {
        Encoding::new(self.default_type.clone(), self.default_quality)
    }
}

/// Resource limits to protect against problematic inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum file size in megabytes
    pub max_file_size_mb: u64,

    /// Maximum image dimension (width or height)
    pub max_image_dimension: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 100,
            max_image_dimension: 10000,
        }
    }
}

/// Identifier generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IdConfig {
    /// Alphabet used for short identifiers (at least 16 characters)
    pub short_alphabet: String,

    /// Number of digits drawn when a count is not given
    pub digit_count: usize,
}

impl Default for IdConfig {
    fn default() -> Self {
        Self {
            short_alphabet: DEFAULT_SHORT_ALPHABET.to_string(),
            digit_count: crate::ids::DEFAULT_DIGIT_COUNT,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
