//! Client SDK for the tracking event relay.
//!
//! Builds structured tracking events, flattens them into the relay's
//! positional payload format and posts them.

pub mod client;
pub mod event;

pub use client::{RelayIngestClient, SdkError};
pub use event::{Property, TrackEvent};
