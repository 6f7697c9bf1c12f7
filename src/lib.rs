//! Feedback ingestion service library.

pub mod config;
pub mod feedback;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::ServiceConfig;
pub use feedback::{FeedbackEvent, FeedbackSink};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
