use reqwest::Client;
use serde_json::{Map, Value};

use crate::event::TrackEvent;

pub type SdkError = Box<dyn std::error::Error + Send + Sync>;

pub struct RelayIngestClient {
    client: Client,
    relay_url: String,
}

impl RelayIngestClient {
    pub fn new(relay_url: &str) -> Self {
        Self {
            client: Client::new(),
            relay_url: relay_url.trim_end_matches('/').to_string(),
        }
    }

    /// Flatten and send one tracking event.
    pub async fn track(&self, event: &TrackEvent) -> Result<(), SdkError> {
        self.send_payload(&event.to_payload()).await
    }

    /// Send an already flattened payload as-is.
    pub async fn send_payload(&self, payload: &Map<String, Value>) -> Result<(), SdkError> {
        let resp = self.client
            .post(format!("{}/", self.relay_url))
            .json(payload)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if status != reqwest::StatusCode::OK {
            return Err(format!("Relay returned error status {}: {}", status, text).into());
        }

        Ok(())
    }
}
