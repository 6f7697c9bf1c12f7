//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON format for production, pretty format for development
//! - `RUST_LOG` wins over the configured level, except for feedback
//!   records, which stay enabled at info whatever the operator sets
//!
//! In JSON format a feedback record is one JSON log object whose
//! `fields.message` holds the `[feedback] {...}` text.

use tracing_subscriber::{
    filter::Directive, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use crate::config::{LogFormat, ObservabilityConfig};
use crate::feedback::FEEDBACK_TARGET;

/// Default filter directives for a given level.
pub fn default_directives(level: &str) -> String {
    format!("feedback_ingest={level},tower_http={level}")
}

/// Resolve the subscriber filter.
///
/// `env_directives` (normally `RUST_LOG`) takes precedence when it parses;
/// otherwise the configured level applies. Either way the feedback target
/// is forced on at info, since the log stream is the only place feedback
/// records are kept.
pub fn build_filter(level: &str, env_directives: Option<&str>) -> EnvFilter {
    let filter = env_directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_new(default_directives(level)).ok())
        .unwrap_or_else(|| EnvFilter::new("info"));

    match format!("{FEEDBACK_TARGET}=info").parse::<Directive>() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Install the global tracing subscriber.
pub fn init_logging(config: &ObservabilityConfig) {
    let env_directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(&config.log_level, env_directives.as_deref());

    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(fmt::layer()).init(),
    }
}

/// In-memory log output for tests.
#[cfg(test)]
pub(crate) struct CapturedLogs {
    buffer: std::sync::Arc<std::sync::Mutex<Vec<u8>>>,
}

#[cfg(test)]
struct BufferWriter(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

#[cfg(test)]
impl std::io::Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Ok(mut bytes) = self.0.lock() {
            bytes.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
impl CapturedLogs {
    pub(crate) fn new() -> Self {
        Self {
            buffer: Default::default(),
        }
    }

    /// Run `f` under a pretty-format subscriber using the same filter
    /// resolution as `init_logging`.
    pub(crate) fn capture<F: FnOnce()>(&self, level: &str, env_directives: Option<&str>, f: F) {
        let buffer = self.buffer.clone();
        let subscriber = fmt()
            .with_env_filter(build_filter(level, env_directives))
            .with_writer(move || BufferWriter(buffer.clone()))
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
    }

    pub(crate) fn contents(&self) -> String {
        self.buffer
            .lock()
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_default()
    }
}
