//! Client for the feedback ingestion service.

use reqwest::{header::USER_AGENT, Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A thumbs up/down on a symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub symbol: String,
    pub verdict: String, // "up" or "down"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl FeedbackRequest {
    pub fn up(symbol: impl Into<String>) -> Self {
        Self::new(symbol, "up")
    }

    pub fn down(symbol: impl Into<String>) -> Self {
        Self::new(symbol, "down")
    }

    fn new(symbol: impl Into<String>, verdict: &str) -> Self {
        Self {
            symbol: symbol.into(),
            verdict: verdict.to_string(),
            reason: None,
            user_id: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

/// The service's acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub ok: bool,
}

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service rejected the payload")]
    Rejected,

    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed acknowledgement: {0}")]
    Decode(#[from] serde_json::Error),
}

pub struct FeedbackClient {
    client: Client,
    base_url: String,
    path: String,
}

impl FeedbackClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            path: "/api/feedback".to_string(),
        }
    }

    /// Use a non-default route.
    pub fn with_path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, self.path)
    }

    /// Submit feedback. A 400 from the service becomes `SdkError::Rejected`.
    pub async fn submit(&self, req: &FeedbackRequest) -> Result<Ack, SdkError> {
        let resp = self.client.post(self.endpoint()).json(req).send().await?;

        let status = resp.status();
        let text = resp.text().await?;

        match status {
            StatusCode::OK => Ok(serde_json::from_str(&text)?),
            StatusCode::BAD_REQUEST => Err(SdkError::Rejected),
            _ => Err(SdkError::Status { status, body: text }),
        }
    }

    /// Post an arbitrary body, optionally with a user-agent, and return the
    /// status alongside the decoded acknowledgement.
    pub async fn submit_raw(
        &self,
        body: impl Into<reqwest::Body>,
        user_agent: Option<&str>,
    ) -> Result<(StatusCode, Ack), SdkError> {
        let mut builder = self
            .client
            .post(self.endpoint())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body);
        if let Some(ua) = user_agent {
            builder = builder.header(USER_AGENT, ua);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        let ack = serde_json::from_str(&text).map_err(|_| SdkError::Status {
            status,
            body: text.clone(),
        })?;
        Ok((status, ack))
    }
}
