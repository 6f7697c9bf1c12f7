//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower::ServiceExt;

use feedback_ingest::config::ServiceConfig;
use feedback_ingest::feedback::{Clock, ManualClock, MemorySink};
use feedback_ingest::http::{build_router, AppState, HttpServer};
use feedback_ingest::lifecycle::Shutdown;

/// Fixed server time used by router-level tests.
pub const TEST_NOW: i64 = 1_700_000_000_000;

pub struct TestApp {
    pub router: Router,
    pub sink: Arc<MemorySink>,
    pub clock: Arc<ManualClock>,
}

pub fn test_app() -> TestApp {
    test_app_with(ServiceConfig::default())
}

pub fn test_app_with(config: ServiceConfig) -> TestApp {
    let sink = Arc::new(MemorySink::new());
    let clock = Arc::new(ManualClock::new(TEST_NOW));
    let state = AppState::new(sink.clone(), clock.clone(), config.feedback.max_body_size);
    TestApp {
        router: build_router(&config, state),
        sink,
        clock,
    }
}

/// Build a POST to `path` with an optional user-agent.
pub fn post(path: &str, body: impl Into<Body>, user_agent: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(ua) = user_agent {
        builder = builder.header(header::USER_AGENT, ua);
    }
    builder.body(body.into()).unwrap()
}

/// Drive one request through the router and decode the JSON body.
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Option<Value>, HeaderMap) {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("failed to make request");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let body = serde_json::from_slice(&bytes).ok();
    (status, body, headers)
}

pub struct RunningServer {
    pub addr: SocketAddr,
    pub sink: Arc<MemorySink>,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

impl RunningServer {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

/// Start a real server on an ephemeral port.
pub async fn spawn_server(config: ServiceConfig, clock: Arc<dyn Clock>) -> RunningServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let sink = Arc::new(MemorySink::new());
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::with_parts(config, sink.clone(), clock);

    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    RunningServer {
        addr,
        sink,
        shutdown,
        handle,
    }
}
