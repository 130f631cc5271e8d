//! Dispatch error definitions.

use std::time::Duration;
use thiserror::Error;

use crate::event::EventError;
use crate::relay::RelayError;

/// Everything that can end a request without a successful relay.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Body could not be turned into a canonical event.
    #[error(transparent)]
    Event(#[from] EventError),

    /// Downstream call failed.
    #[error(transparent)]
    Relay(#[from] RelayError),

    /// Worker did not report back in time.
    #[error("event pipeline did not complete within {0:?}")]
    Timeout(Duration),

    /// Worker ended without reporting (panicked).
    #[error("event worker exited without reporting a result")]
    WorkerLost,
}

impl DispatchError {
    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            DispatchError::Event(EventError::Decode(_)) => "decode",
            DispatchError::Event(_) => "invalid_field",
            DispatchError::Relay(RelayError::Transport(_)) => "relay_transport",
            DispatchError::Relay(RelayError::UnexpectedStatus(_)) => "relay_status",
            DispatchError::Relay(RelayError::Encode(_)) => "relay_encode",
            DispatchError::Relay(_) => "relay_config",
            DispatchError::Timeout(_) => "timeout",
            DispatchError::WorkerLost => "worker_lost",
        }
    }
}
