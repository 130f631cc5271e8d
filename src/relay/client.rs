//! HTTP client for the downstream receiver.
//!
//! # Responsibilities
//! - Serialize a canonical event to JSON
//! - POST it to the configured downstream URL
//! - Map transport failures and non-200 answers to [`RelayError`]

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

use crate::config::DownstreamConfig;
use crate::event::CanonicalEvent;
use crate::http::X_REQUEST_ID;
use crate::observability::metrics;
use crate::relay::error::{RelayError, RelayResult};

/// Relay client bound to a single downstream URL.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct RelayClient {
    client: Client,
    url: Url,
}

impl RelayClient {
    /// Create a new relay client.
    pub fn new(config: &DownstreamConfig) -> RelayResult<Self> {
        let url = parse_downstream_url(&config.url)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| RelayError::Client(e.to_string()))?;

        tracing::debug!(url = %url, timeout_secs = config.timeout_secs, "Relay client initialized");

        Ok(Self { client, url })
    }

    /// Forward one event downstream.
    ///
    /// `request_id` is propagated as `x-request-id` when present.
    pub async fn send(&self, event: &CanonicalEvent, request_id: Option<&str>) -> RelayResult<()> {
        let body = serde_json::to_vec(event)?;

        let mut request = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body);
        if let Some(id) = request_id.and_then(|id| HeaderValue::from_str(id).ok()) {
            request = request.header(X_REQUEST_ID, id);
        }

        let response = request.send().await?;
        let status = response.status();
        metrics::record_downstream_status(status.as_u16());

        // Drain so the connection can go back to the pool; content is irrelevant.
        let _ = response.bytes().await;

        if status != StatusCode::OK {
            tracing::warn!(url = %self.url, status = %status, "Downstream rejected event");
            return Err(RelayError::UnexpectedStatus(status.as_u16()));
        }

        Ok(())
    }

    /// Get the downstream URL.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl std::fmt::Debug for RelayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayClient")
            .field("url", &self.url.as_str())
            .finish()
    }
}

/// Parse and check a downstream URL. Only `http` and `https` are accepted.
pub fn parse_downstream_url(raw: &str) -> RelayResult<Url> {
    let url = Url::parse(raw).map_err(|e| RelayError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(RelayError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}
