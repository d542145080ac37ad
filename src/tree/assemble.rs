//! Recursive tree assembly.
//!
//! # Responsibilities
//! - Walk subdirectories of the routes root, siblings concurrently
//! - Resolve index routers and method handlers through the registry
//! - Nest each fully populated sub-router onto its parent
//! - Accumulate a [`LoadReport`] across the whole subtree
//!
//! # Design Decisions
//! - A node's subtree settles before the node is mounted upward, so a
//!   mounted router is never observed half-populated
//! - Sibling loads run concurrently on one task (cooperative, join
//!   semantics); the call returns only when every subtree has settled
//! - Only an unreadable root is fatal; everything below it degrades to
//!   diagnostics
//! - Directory names pass through to axum's route syntax verbatim, so a
//!   directory named `{id}` becomes a path capture

use std::io;
use std::path::{Path, PathBuf};

use axum::routing::MethodRouter;
use axum::Router;
use futures_util::future::{join_all, BoxFuture};
use thiserror::Error;
use tokio::fs;

use crate::registry::{HandlerRegistry, Resolution};
use crate::tree::report::{Diagnostic, DiagnosticKind, LoadReport};
use crate::tree::scan::scan_dir;

/// Fatal load failures. Everything else is contained in the report.
#[derive(Debug, Error)]
pub enum MountError {
    #[error("routes root {} is not readable: {source}", .path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("routes root {} is not a directory", .path.display())]
    NotADirectory { path: PathBuf },
}

/// A populated router plus the report of how it got that way.
pub struct Mounted {
    pub router: Router,
    pub report: LoadReport,
}

/// Mount one subdirectory tree onto `parent`.
///
/// Every immediate subdirectory of `root` becomes a sub-router nested at
/// `/<name>`, recursively. Files directly under `root` itself are not
/// markers and are counted as ignored. The returned router is `parent`
/// with the tree attached; `parent`'s existing routes are untouched.
pub async fn mount_routes(
    root: impl AsRef<Path>,
    parent: Router,
    registry: &HandlerRegistry,
) -> Result<Mounted, MountError> {
    let root = root.as_ref();

    let meta = fs::metadata(root)
        .await
        .map_err(|source| MountError::RootUnreadable {
            path: root.to_path_buf(),
            source,
        })?;
    if !meta.is_dir() {
        return Err(MountError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let scan = scan_dir(root)
        .await
        .map_err(|source| MountError::RootUnreadable {
            path: root.to_path_buf(),
            source,
        })?;

    let mut report = LoadReport::default();
    let stray = scan.methods.len() + scan.ignored.len() + usize::from(scan.index.is_some());
    if stray > 0 {
        tracing::debug!(
            root = %root.display(),
            count = stray,
            "Files directly under the routes root are not markers"
        );
        report.files_ignored += stray;
    }

    let children = join_all(scan.subdirs.iter().map(|segment| {
        load_node(
            root.join(segment),
            segment.clone(),
            segment.clone(),
            registry,
        )
    }))
    .await;

    let mut router = parent;
    for child in children {
        router = router.nest(&format!("/{}", child.segment), child.router);
        report.merge(child.report);
    }

    tracing::info!(
        root = %root.display(),
        nodes = report.nodes_mounted,
        handlers = report.handlers_bound,
        diagnostics = report.diagnostics.len(),
        "Route tree mounted"
    );

    Ok(Mounted { router, report })
}

struct NodeOutcome {
    segment: String,
    router: Router,
    report: LoadReport,
}

/// Record a contained failure and keep going.
fn note(report: &mut LoadReport, key: String, kind: DiagnosticKind) {
    let diag = Diagnostic { key, kind };
    tracing::warn!(%diag, "Route tree degraded");
    report.diagnostics.push(diag);
}

/// Build the router for one directory node.
///
/// `rel` is the node's `/`-joined path under the routes root; it prefixes
/// every registry key below this node. Boxed because the future recurses.
fn load_node(
    dir: PathBuf,
    segment: String,
    rel: String,
    registry: &HandlerRegistry,
) -> BoxFuture<'_, NodeOutcome> {
    Box::pin(async move {
        let mut report = LoadReport::default();

        let scan = match scan_dir(&dir).await {
            Ok(scan) => scan,
            Err(e) => {
                note(
                    &mut report,
                    rel.clone(),
                    DiagnosticKind::DirUnreadable(e.to_string()),
                );
                return NodeOutcome {
                    segment,
                    router: Router::new(),
                    report,
                };
            }
        };

        // Node router: a registered index router, or a fresh empty one. A
        // directory without an index marker gets the empty router silently;
        // a marker that does not resolve is reported first.
        let mut router = if scan.index.is_some() {
            let key = format!("{rel}/index");
            match registry.resolve_router(&key) {
                Resolution::Loaded(router) => router,
                Resolution::Absent => {
                    note(&mut report, key, DiagnosticKind::IndexUnregistered);
                    Router::new()
                }
                Resolution::Failed(e) => {
                    note(&mut report, key, DiagnosticKind::IndexFailed(e.to_string()));
                    Router::new()
                }
            }
        } else {
            Router::new()
        };

        // Method bindings at this node's own mount point.
        let mut method_router: MethodRouter = MethodRouter::new();
        let mut bound = 0usize;
        for marker in &scan.methods {
            let key = format!("{rel}/{}", marker.method.as_str());
            match registry.resolve_handler(&key) {
                Resolution::Loaded(svc) => {
                    method_router = match marker.method.filter() {
                        Some(filter) => method_router.on_service(filter, svc),
                        None => method_router.fallback_service(svc),
                    };
                    bound += 1;
                    tracing::debug!(key = %key, "Handler bound");
                }
                Resolution::Absent => {
                    note(&mut report, key, DiagnosticKind::HandlerUnregistered);
                }
                Resolution::Failed(e) => {
                    note(
                        &mut report,
                        key,
                        DiagnosticKind::HandlerFailed(e.to_string()),
                    );
                }
            }
        }
        if bound > 0 {
            router = router.route("/", method_router);
        }
        report.handlers_bound += bound;
        report.files_ignored += scan.ignored.len();
        for stem in &scan.duplicates {
            note(
                &mut report,
                format!("{rel}/{stem}"),
                DiagnosticKind::DuplicateMarker,
            );
        }

        // Children settle before this node is handed upward.
        let children = join_all(scan.subdirs.iter().map(|child| {
            load_node(
                dir.join(child),
                child.clone(),
                format!("{rel}/{child}"),
                registry,
            )
        }))
        .await;
        for child in children {
            router = router.nest(&format!("/{}", child.segment), child.router);
            report.merge(child.report);
        }

        report.nodes_mounted += 1;
        NodeOutcome {
            segment,
            router,
            report,
        }
    })
}
