//! Metrics collection and exposition.
//!
//! # Metrics
//! - `feedback_events_total` (counter): accepted events by verdict
//! - `feedback_request_duration_seconds` (histogram): handler latency
//!
//! Rejected payloads are not counted.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::feedback::Verdict;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one accepted feedback event.
pub fn record_feedback(verdict: Option<&Verdict>, start_time: Instant) {
    let label = verdict.map(Verdict::as_label).unwrap_or("none");
    metrics::counter!("feedback_events_total", "verdict" => label).increment(1);
    metrics::histogram!("feedback_request_duration_seconds")
        .record(start_time.elapsed().as_secs_f64());
}
