//! Tracking event reshaping subsystem.
//!
//! # Data Flow
//! ```text
//! request body (flat JSON object)
//!     → payload.rs (decode into RawPayload, checked string reads)
//!     → extractor.rs (atrk/uatrk key families → attribute and trait sets)
//!     → assembler.rs (nine required scalars + sets → CanonicalEvent)
//!     → handed to the relay client, then dropped
//! ```
//!
//! # Design Decisions
//! - Every read from the payload is checked; a bad value is a typed error, never a panic
//! - All-or-nothing: one bad field fails the whole event, no partial records
//! - Unrecognized payload keys are ignored

pub mod assembler;
pub mod error;
pub mod extractor;
pub mod payload;
pub mod types;

pub use assembler::{assemble, decode_event};
pub use error::{EventError, EventResult};
pub use extractor::{extract, ATTRIBUTE_FAMILY, TRAIT_FAMILY};
pub use payload::RawPayload;
pub use types::{AttributeEntry, AttributeSet, CanonicalEvent};
