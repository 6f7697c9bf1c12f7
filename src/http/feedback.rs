//! `POST /api/feedback` handler.

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{header::USER_AGENT, HeaderMap},
    Json,
};

use crate::feedback::{ClientPayloadError, FeedbackEvent, UNKNOWN_USER_AGENT};
use crate::http::request::RequestIdExt;
use crate::http::response::Ack;
use crate::http::server::AppState;
use crate::observability::metrics;

/// Accept one feedback event.
///
/// The body is parsed as JSON without checking its shape or the content
/// type. On success the event is stamped with the server time and the
/// caller's user-agent, handed to the sink, and acknowledged with
/// `{"ok": true}`. Anything that fails to parse gets 400 `{"ok": false}`
/// and nothing is written.
pub async fn ingest_feedback(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Body,
) -> Result<Json<Ack>, ClientPayloadError> {
    let start_time = Instant::now();

    let bytes = axum::body::to_bytes(body, state.max_body_size).await?;
    let payload: serde_json::Value = serde_json::from_slice(&bytes)?;
    let ts = state.clock.now_millis();

    let ua = headers
        .get(USER_AGENT)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .unwrap_or_else(|| UNKNOWN_USER_AGENT.to_string());

    let event = FeedbackEvent::from_payload(payload, ts, ua);

    tracing::debug!(
        request_id = %headers.request_id(),
        fields = event.fields().len(),
        "Feedback accepted"
    );

    state.sink.write(&event);
    metrics::record_feedback(event.verdict().as_ref(), start_time);

    Ok(Json(Ack::accepted()))
}
