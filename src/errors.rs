//! Error types for feedshaper
//!
//! Scoring and analytics never fail on data-shape problems: missing fields
//! default to empty and degenerate inputs produce empty results. The errors
//! here cover configuration and loading failures, which the composition root
//! is expected to surface at startup.

use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, FeedError>;

/// Main error type for feedshaper
#[derive(Error, Debug)]
pub enum FeedError {
    /// Configuration validation failed
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Reading a preset or vocabulary file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A named preset was requested but not found in the bundle
    #[error("Unknown preset: {name}")]
    UnknownPreset { name: String },
}

impl FeedError {
    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create an I/O error bound to the file that caused it
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an unknown preset error
    pub fn unknown_preset(name: impl Into<String>) -> Self {
        Self::UnknownPreset { name: name.into() }
    }

    /// Check if this error came from a bad configuration value
    /// (as opposed to a missing or unreadable file)
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. } | Self::UnknownPreset { .. })
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}
