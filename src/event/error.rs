//! Event decoding errors.

use thiserror::Error;

/// Errors raised while turning a request body into a canonical event.
#[derive(Debug, Error)]
pub enum EventError {
    /// Body is not a JSON object.
    #[error("error decoding JSON request: {0}")]
    Decode(#[from] serde_json::Error),

    /// A required scalar or a referenced attribute/trait key is absent.
    #[error("missing required field `{0}`")]
    MissingField(String),

    /// A field is present but holds something other than a string.
    #[error("field `{field}` must be a string, got {found}")]
    NotAString { field: String, found: &'static str },
}

/// Result type for event decoding.
pub type EventResult<T> = Result<T, EventError>;
