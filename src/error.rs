use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Recollect
#[derive(Error, Debug)]
pub enum RecollectError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration validation errors
    #[error("Configuration validation failed: {errors:?}")]
    ConfigValidation { errors: Vec<ValidationError> },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Invalid configuration value
    #[error("Invalid configuration value at {path}: {message}")]
    InvalidConfigValue { path: String, message: String },

    /// A pattern in the registry failed to compile
    #[error("Invalid pattern '{name}': {message}")]
    Pattern { name: String, message: String },

    /// The summary corpus could not be fetched
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// A summary record failed boundary validation
    #[error("Malformed summary record '{id}': {message}")]
    MalformedRecord { id: String, message: String },

    /// Analytics sink rejected an event
    #[error("Analytics error: {0}")]
    Analytics(String),

    /// IO errors
    #[error("IO error: {context}: {source}")]
    Io {
        source: std::io::Error,
        context: String,
    },

    /// TOML deserialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSerialization(#[from] toml::ser::Error),

    /// JSON errors
    #[error("JSON error: {context}: {source}")]
    Json {
        source: serde_json::Error,
        context: String,
    },

    /// Generic errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Path to the configuration key that failed validation
    pub path: String,
    /// Error message describing the validation failure
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

/// Result type for Recollect operations
pub type Result<T> = std::result::Result<T, RecollectError>;
