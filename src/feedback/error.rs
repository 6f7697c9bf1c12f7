//! Ingestion failure.

use thiserror::Error;

/// The request body could not be turned into JSON.
///
/// Malformed JSON, an empty body, an unreadable body and a body over the
/// size cap all collapse into this one kind.
#[derive(Debug, Error)]
#[error("unparseable feedback payload: {source}")]
pub struct ClientPayloadError {
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl From<serde_json::Error> for ClientPayloadError {
    fn from(e: serde_json::Error) -> Self {
        Self { source: Box::new(e) }
    }
}

impl From<axum::Error> for ClientPayloadError {
    fn from(e: axum::Error) -> Self {
        Self { source: Box::new(e) }
    }
}
