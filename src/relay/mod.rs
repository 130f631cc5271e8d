//! Downstream relay subsystem.
//!
//! # Data Flow
//! ```text
//! CanonicalEvent
//!     → client.rs (serialize, POST application/json, check status)
//!     → downstream receiver
//! ```
//!
//! # Design Decisions
//! - Exactly one attempt per event; failures are reported, never retried
//! - Only HTTP 200 counts as success
//! - Response bodies are drained and ignored
//! - Downstream URL comes from configuration

pub mod client;
pub mod error;

pub use client::RelayClient;
pub use error::{RelayError, RelayResult};
