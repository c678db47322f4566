//! Error types for Pixkit.
//!
//! Errors are organized by component so callers can match on the failing
//! area (configuration, image pipeline, identifier generation) and still get
//! a readable message with the relevant context (file names, limits).

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for Pixkit operations.
#[derive(Error, Debug)]
pub enum PixkitError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Image pipeline errors
    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    /// Identifier generation errors
    #[error("Identifier error: {0}")]
    Id(#[from] IdError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Image pipeline errors: file reading, decoding, surface serialization.
#[derive(Error, Debug)]
pub enum ImageError {
    /// The file-reading primitive reported a failure
    #[error("Failed to read {name}: {message}")]
    Read { name: String, message: String },

    /// The read completed but produced nothing usable as a data URL
    #[error("Reading {name} produced an empty or malformed data URL")]
    EmptyRead { name: String },

    /// Image decoding failed
    #[error("Decode error: {0}")]
    Decode(String),

    /// Surface serialization failed
    #[error("Encode error for {mime}: {message}")]
    Encode { mime: String, message: String },

    /// Image dimensions exceed limit
    #[error("Image too large: {width}x{height} > {max_dim}")]
    ImageTooLarge {
        width: u32,
        height: u32,
        max_dim: u32,
    },

    /// File exceeds size limit
    #[error("File too large: {path} ({size_mb}MB > {max_mb}MB)")]
    FileTooLarge {
        path: PathBuf,
        size_mb: u64,
        max_mb: u64,
    },

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// A decoded payload lacks a field needed to build a file
    #[error("Cannot build a file from a decoded payload without its {field}")]
    MissingPayload { field: &'static str },
}

/// Identifier generation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum IdError {
    /// The caller-supplied alphabet cannot cover every digit value
    #[error("Alphabet must contain at least {min} entries, got {len}")]
    AlphabetTooShort { len: usize, min: usize },
}

/// Convenience type alias for Pixkit results.
pub type Result<T> = std::result::Result<T, PixkitError>;

/// Convenience type alias for image pipeline results.
pub type ImageResult<T> = std::result::Result<T, ImageError>;
