//! Feedback ingestion core.
//!
//! # Data Flow
//! ```text
//! request body (bytes)
//!     → serde_json::Value          (ClientPayloadError on failure)
//!     → event.rs (merge caller fields, then apply ts + ua)
//!     → sink.rs (one write, not awaited)
//! ```
//!
//! # Design Decisions
//! - No schema validation: any JSON value is accepted
//! - Server-assigned fields are applied after the caller's, never before
//! - Sink and clock are injected so tests can observe and pin them

pub mod clock;
pub mod error;
pub mod event;
pub mod sink;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::ClientPayloadError;
pub use event::{FeedbackEvent, Verdict, FEEDBACK_MARKER, UNKNOWN_USER_AGENT};
pub use sink::{FeedbackSink, MemorySink, TracingSink, FEEDBACK_TARGET};
