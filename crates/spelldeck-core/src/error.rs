//! Error types for the SpellDeck pipeline.
//!
//! Errors are split by origin: configuration, remote services, and parsing of
//! model output. Per-word synthesis failures never surface here; they are
//! logged and dropped by the synthesizer.

use thiserror::Error;

/// Top-level error type for SpellDeck operations.
#[derive(Error, Debug)]
pub enum DeckError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A remote service call failed or returned an unexpected shape
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    /// Model output did not match the expected format
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
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

    /// The service credential could not be resolved
    #[error("{0} environment variable not set.")]
    MissingCredential(String),
}

/// A failed call to one of the remote AI services.
#[derive(Error, Debug)]
#[error("{service}: {message}")]
pub struct ServiceError {
    /// Which capability failed ("vision", "chat", "speech")
    pub service: &'static str,
    /// Human-readable failure description
    pub message: String,
    /// HTTP status when the server answered
    pub status_code: Option<u16>,
}

impl ServiceError {
    pub fn new(service: &'static str, message: impl Into<String>) -> Self {
        Self {
            service,
            message: message.into(),
            status_code: None,
        }
    }

    pub fn with_status(service: &'static str, status: u16, message: impl Into<String>) -> Self {
        Self {
            service,
            message: message.into(),
            status_code: Some(status),
        }
    }
}

/// Errors raised while parsing model responses.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// A sentence line had no `word|sentence` separator
    #[error("Line {line_number} has no '|' separator: {line:?}")]
    MissingSeparator { line_number: usize, line: String },
}

/// Convenience type alias for SpellDeck results.
pub type Result<T> = std::result::Result<T, DeckError>;
