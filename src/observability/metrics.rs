//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_ingest_requests_total` (counter): inbound requests by outcome
//! - `relay_ingest_duration_seconds` (histogram): time from receipt to response
//! - `relay_downstream_responses_total` (counter): downstream answers by status
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one finished inbound request.
pub fn record_ingest(outcome: &'static str, start: Instant) {
    counter!("relay_ingest_requests_total", "outcome" => outcome).increment(1);
    histogram!("relay_ingest_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record the status code of one downstream answer.
pub fn record_downstream_status(status: u16) {
    counter!("relay_downstream_responses_total", "status" => status.to_string()).increment(1);
}
