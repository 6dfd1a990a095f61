//! Error types for the rainbow_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for rainbow_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller supplied input the stores refuse to accept
    #[error("Validation error: {0}")]
    Validation(String),

    /// Barcode lookup could not reach the product database
    #[error("Lookup error: {0}")]
    Lookup(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// True for failures the user can simply retry (network trouble)
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Lookup(_))
    }
}
