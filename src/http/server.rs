//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the feedback handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener
//! - Stop gracefully on shutdown

use axum::{routing::post, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::feedback::{Clock, FeedbackSink, SystemClock, TracingSink};
use crate::http::feedback::ingest_feedback;
use crate::http::request::MakeRequestUuidV4;

/// Application state injected into handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub sink: Arc<dyn FeedbackSink>,
    pub clock: Arc<dyn Clock>,
    pub max_body_size: usize,
}

impl AppState {
    pub fn new(sink: Arc<dyn FeedbackSink>, clock: Arc<dyn Clock>, max_body_size: usize) -> Self {
        Self {
            sink,
            clock,
            max_body_size,
        }
    }
}

/// HTTP server for the feedback service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a server that logs to the tracing stream and uses wall-clock time.
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_parts(config, Arc::new(TracingSink), Arc::new(SystemClock))
    }

    /// Create a server with an explicit sink and clock.
    pub fn with_parts(
        config: ServiceConfig,
        sink: Arc<dyn FeedbackSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let state = AppState::new(sink, clock, config.feedback.max_body_size);
        let router = build_router(&config, state);
        Self { router, config }
    }

    /// Run the server until `shutdown` fires or its sender is dropped.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            path = %self.config.feedback.path,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &ServiceConfig, state: AppState) -> Router {
    Router::new()
        .route(&config.feedback.path, post(ingest_feedback))
        .with_state(state)
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
}
