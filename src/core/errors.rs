//! Shared error types for the analysis engine

use thiserror::Error;

/// Main error type for vibecheck operations
#[derive(Debug, Error)]
pub enum Error {
    /// Pattern library or configuration errors. Fatal at startup,
    /// never produced by a per-request analysis.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The caller handed us input we refuse to analyze. No partial
    /// verdict is produced for rejected input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The external reasoning collaborator failed outright. Deep-mode
    /// analysis recovers from this internally; it only surfaces when a
    /// collaborator is invoked directly.
    #[error("External reasoning failed: {0}")]
    External(String),

    /// Wrapped I/O errors from config loading
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Config-time validation failure for a pattern definition.
    pub fn invalid_pattern(pattern_id: &str, reason: impl Into<String>) -> Self {
        Error::Config(format!("pattern '{}': {}", pattern_id, reason.into()))
    }
}
