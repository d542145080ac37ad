//! Route tree assembly subsystem.
//!
//! # Data Flow
//! ```text
//! routes root directory
//!     → scan.rs (list one directory: subdirs, method markers, index marker)
//!     → assemble.rs (resolve registry entries, recurse, nest sub-routers)
//!     → Return: populated axum Router + LoadReport
//!
//! Per subdirectory (depth-first, siblings concurrent):
//!     index marker?  → registry router or empty Router
//!     method markers → registry handlers bound at "/"
//!     child dirs     → recurse, then nest at "/<name>"
//! ```
//!
//! # Design Decisions
//! - Tree shape comes from disk; callables come from the registry
//! - Directory entries sorted by name, so mount order is stable
//! - Failures contained per file / per directory, reported, never fatal;
//!   only an unreadable root aborts the load
//! - Routers built bottom-up: a node is fully populated before it is mounted

pub mod assemble;
pub mod method;
pub mod report;
pub mod scan;

pub use assemble::{mount_routes, MountError, Mounted};
pub use method::MethodKind;
pub use report::{Diagnostic, DiagnosticKind, LoadReport};
pub use scan::{scan_dir, DirScan, MethodFile};
