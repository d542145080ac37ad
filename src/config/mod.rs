//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults, so a minimal (or absent) config works
//! - Validation separates syntactic (serde) from semantic checks
//! - No reload: the route tree is built once at startup, so configuration
//!   is read once and stays fixed for the process lifetime

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::RoutesConfig;
pub use schema::ServerConfig;
pub use schema::TimeoutConfig;
