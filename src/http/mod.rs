//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! assembled Router (tree::mount_routes)
//!     → server.rs (middleware stack, axum serve, graceful shutdown)
//!     → request.rs (request ID on ingress, available as an extension)
//!     → bound handlers
//! ```

pub mod request;
pub mod server;

pub use request::{RequestId, RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
