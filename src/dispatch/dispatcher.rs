//! Per-request worker dispatch.

use axum::body::Bytes;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::timeout;

use crate::dispatch::error::DispatchError;
use crate::event::decode_event;
use crate::relay::RelayClient;

/// Runs each request's pipeline on its own task and waits for the outcome.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    relay: RelayClient,
    wait: Duration,
}

impl Dispatcher {
    /// Create a dispatcher relaying through `relay`, waiting at most `wait` per request.
    pub fn new(relay: RelayClient, wait: Duration) -> Self {
        Self { relay, wait }
    }

    /// Dispatch one request body and wait for its single outcome.
    pub async fn dispatch(
        &self,
        body: Bytes,
        request_id: Option<String>,
    ) -> Result<(), DispatchError> {
        let (tx, rx) = oneshot::channel();
        let relay = self.relay.clone();

        tokio::spawn(async move {
            let outcome = process(&relay, &body, request_id.as_deref()).await;
            // Receiver is gone only if the caller already gave up waiting.
            if tx.send(outcome).is_err() {
                tracing::debug!(request_id = ?request_id, "Worker finished after caller stopped waiting");
            }
        });

        match timeout(self.wait, rx).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(_)) => Err(DispatchError::WorkerLost),
            Err(_) => Err(DispatchError::Timeout(self.wait)),
        }
    }

    /// Get the per-request wait bound.
    pub fn wait(&self) -> Duration {
        self.wait
    }
}

/// Full pipeline for one body: decode → extract → assemble → relay.
pub async fn process(
    relay: &RelayClient,
    body: &[u8],
    request_id: Option<&str>,
) -> Result<(), DispatchError> {
    let event = decode_event(body)?;
    relay.send(&event, request_id).await?;
    Ok(())
}
