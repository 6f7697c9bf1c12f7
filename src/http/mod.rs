//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → feedback.rs (parse, stamp, write to sink)
//!     → response.rs ({"ok": bool})
//!     → Send to client
//! ```

pub mod feedback;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, RequestIdExt, X_REQUEST_ID};
pub use response::Ack;
pub use server::{build_router, AppState, HttpServer};
