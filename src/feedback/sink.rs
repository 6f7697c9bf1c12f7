//! Destinations for accepted feedback events.

use std::fmt;
use std::sync::Mutex;

use crate::feedback::event::FeedbackEvent;

/// Anything that can receive feedback events.
///
/// Writes are fire-and-forget: the handler never waits on, or learns
/// about, the durability of a write.
pub trait FeedbackSink: Send + Sync + fmt::Debug {
    fn write(&self, event: &FeedbackEvent);
}

/// Tracing target every feedback record is written on.
///
/// Not a prefix of any module path in this crate, so operator directives
/// for `feedback_ingest` never match it.
pub const FEEDBACK_TARGET: &str = "feedback::record";

/// Writes each event as one `[feedback] {...}` line at info level on
/// [`FEEDBACK_TARGET`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl FeedbackSink for TracingSink {
    fn write(&self, event: &FeedbackEvent) {
        match event.log_line() {
            Ok(line) => tracing::info!(target: FEEDBACK_TARGET, "{}", line),
            Err(e) => tracing::error!(error = %e, "Failed to serialize feedback event"),
        }
    }
}

/// Keeps events in memory. Used by tests in place of the log stream.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<FeedbackEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything written so far.
    pub fn records(&self) -> Vec<FeedbackEvent> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FeedbackSink for MemorySink {
    fn write(&self, event: &FeedbackEvent) {
        if let Ok(mut records) = self.records.lock() {
            records.push(event.clone());
        }
    }
}
