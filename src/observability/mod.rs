//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via tracing; the request ID flows through spans
//! - RUST_LOG wins over the configured default filter

pub mod logging;
