//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the ingest handler
//! - Wire up middleware (tracing, body limit, request ID)
//! - Bind server to listener
//! - Hand each request body to the dispatcher
//! - Turn the dispatch outcome into a response

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::dispatch::Dispatcher;
use crate::http::request::{request_id, MakeRequestUuidV4, X_REQUEST_ID};
use crate::observability::metrics;
use crate::relay::{RelayClient, RelayResult};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
}

/// HTTP server for the event relay.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails only if the downstream relay client cannot be built.
    pub fn new(config: ServiceConfig) -> RelayResult<Self> {
        let relay = RelayClient::new(&config.downstream)?;
        let dispatcher = Dispatcher::new(relay, Duration::from_secs(config.dispatch.timeout_secs));

        let state = AppState { dispatcher };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/", post(ingest_handler))
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.listener.max_body_size))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID)),
            )
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            downstream = %self.config.downstream.url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

/// Ingest handler.
/// Dispatches the body and waits for the relay outcome.
async fn ingest_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&headers).map(str::to_string);

    tracing::debug!(
        request_id = ?request_id,
        bytes = body.len(),
        "Dispatching event"
    );

    match state.dispatcher.dispatch(body, request_id.clone()).await {
        Ok(()) => {
            metrics::record_ingest("ok", start_time);
            tracing::debug!(request_id = ?request_id, "Event relayed");
            StatusCode::OK.into_response()
        }
        Err(e) => {
            metrics::record_ingest(e.kind(), start_time);
            tracing::warn!(
                request_id = ?request_id,
                kind = e.kind(),
                error = %e,
                "Event relay failed"
            );
            e.into_response()
        }
    }
}
