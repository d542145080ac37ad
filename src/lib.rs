//! Directory-driven route assembly for Axum.
//!
//! The router tree mirrors a filesystem tree: every subdirectory of a routes
//! root becomes a nested router mounted at its directory name, and marker
//! files named after HTTP methods (`get.*`, `post.*`, ...) become handler
//! bindings at that directory's mount point. Handler callables come from a
//! [`HandlerRegistry`] keyed by marker path, so the set of routes stays
//! statically enumerable while the tree shape lives on disk.

// Core subsystems
pub mod registry;
pub mod tree;

// Serving and cross-cutting concerns
pub mod config;
pub mod http;
pub mod observability;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use registry::HandlerRegistry;
pub use tree::{mount_routes, Mounted};
