//! Tracking event relay library.
//!
//! Accepts a flat, positionally-encoded tracking payload over HTTP, reshapes it
//! into a canonical event and relays it to one downstream receiver.

pub mod config;
pub mod dispatch;
pub mod event;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod relay;

pub use config::schema::ServiceConfig;
pub use dispatch::Dispatcher;
pub use event::CanonicalEvent;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use relay::RelayClient;
