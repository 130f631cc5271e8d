//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP handler, relay client:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape, when enabled)
//! ```
//!
//! # Design Decisions
//! - Request ID flows from the inbound request into logs and the downstream call
//! - Metrics are cheap (atomic increments) and off by default

pub mod logging;
pub mod metrics;
