//! Error types for the fixture runner
//!
//! These are failures of the harness itself (bad configuration, IO, worker
//! crashes). Conditions raised by a test body are data and live in
//! [`crate::testing::Raised`].

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the fixture runner
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("Invalid match pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    // === Suite Errors ===
    #[error("No test case matches filter '{0}'")]
    NoMatchingCases(String),

    #[error("Worker for test case '{name}' failed: {reason}")]
    WorkerFailed { name: String, reason: String },

    // === IO Errors ===
    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Internal Errors ===
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an invalid pattern error
    pub fn invalid_pattern(pattern: &str, reason: impl ToString) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a worker failed error
    pub fn worker_failed(name: &str, reason: impl ToString) -> Self {
        Self::WorkerFailed {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }
}
