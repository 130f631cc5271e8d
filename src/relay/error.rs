//! Relay error definitions.

use thiserror::Error;

/// Errors that can occur while forwarding an event downstream.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Downstream URL is unusable.
    #[error("invalid downstream URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// HTTP client could not be constructed.
    #[error("failed to build relay client: {0}")]
    Client(String),

    /// Event could not be serialized.
    #[error("error encoding event for downstream: {0}")]
    Encode(#[from] serde_json::Error),

    /// Connection refused, DNS failure, timeout and similar transport failures.
    #[error("error sending event downstream: {0}")]
    Transport(#[from] reqwest::Error),

    /// Downstream answered with something other than 200.
    #[error("unexpected response status code from downstream: {0}")]
    UnexpectedStatus(u16),
}

/// Result type for relay operations.
pub type RelayResult<T> = Result<T, RelayError>;
