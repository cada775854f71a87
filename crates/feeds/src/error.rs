//! Error types for status queries.

use thiserror::Error;

/// Errors that can occur while querying the daemon or a sensor.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Failed to run {command}: {reason}")]
    CommandFailed { command: String, reason: String },

    #[error("{command} exited with status {status}: {stderr}")]
    NonZeroExit {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Failed to parse output: {0}")]
    ParseError(String),
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::ParseError(err.to_string())
    }
}

impl FeedError {
    /// Returns true if the command ran but its output was unusable.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, FeedError::ParseError(_))
    }
}

/// Result type for feed operations.
pub type FeedResult<T> = Result<T, FeedError>;
