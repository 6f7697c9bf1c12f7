//! Response bodies.
//!
//! # Design Decisions
//! - Every outcome of the feedback endpoint is a fixed `{"ok": bool}` body
//! - Payload errors map to 400 with no detail leaked to the caller

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::feedback::ClientPayloadError;

/// Acknowledgement returned to the submitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub ok: bool,
}

impl Ack {
    pub const fn accepted() -> Self {
        Self { ok: true }
    }

    pub const fn rejected() -> Self {
        Self { ok: false }
    }
}

impl IntoResponse for ClientPayloadError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(Ack::rejected())).into_response()
    }
}
