//! Error types for the pathscore engine.
//!
//! Only conditions that must abort an evaluation are errors. An empty
//! alignment, a single-member ensemble and an unscored forecaster are all
//! represented in the data instead.

use thiserror::Error;

/// The main error type for pathscore operations.
#[derive(Debug, Error)]
pub enum PathScoreError {
    /// Invalid scoring configuration or ensemble shape.
    ///
    /// Raised when the time increment is zero, does not evenly divide a
    /// scoring interval, or when ensemble members have inconsistent lengths.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An ensemble failed validation against its expected shape and timing.
    #[error("Invalid ensemble: {0}")]
    InvalidEnsemble(String),

    /// A timestamp could not be parsed.
    #[error("Invalid time: {0}")]
    InvalidTime(String),

    /// Error due to invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// An ensemble producer failed to generate paths.
    #[error("Producer error: {0}")]
    Producer(String),

    /// A score consumer rejected a report.
    #[error("Sink error: {0}")]
    Sink(String),

    /// Error from JSON (de)serialization.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for PathScoreError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for PathScoreError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for pathscore operations.
pub type Result<T> = std::result::Result<T, PathScoreError>;
