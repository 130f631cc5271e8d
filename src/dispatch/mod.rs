//! Request dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! inbound body
//!     → dispatcher.rs spawns one worker task per request
//!         worker: decode → extract → assemble → relay
//!         worker: sends exactly one outcome on a oneshot channel
//!     → caller awaits the receiver under a deadline
//!     → Result<(), DispatchError> back to the HTTP handler
//! ```
//!
//! # Design Decisions
//! - One worker per request, no pool and no admission limit
//! - Workers share nothing; each owns its payload and event
//! - The wait is bounded; a worker that outlives it is not cancelled,
//!   its late outcome is dropped
//! - No retries: the first outcome is final

pub mod dispatcher;
pub mod error;

pub use dispatcher::{process, Dispatcher};
pub use error::DispatchError;
