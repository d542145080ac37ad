//! Load reporting.
//!
//! A load never aborts on a bad entry; it records what went wrong and keeps
//! going. The report is how callers find out which parts of the tree are
//! missing, without having to probe endpoints for 404s.

use serde::Serialize;

/// Outcome summary of one tree load.
///
/// Child reports fold into their parent's, so the report returned from a
/// mount covers the whole subtree.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    /// Directory nodes mounted (one per subdirectory of the root, recursively).
    pub nodes_mounted: usize,
    /// Handler bindings made.
    pub handlers_bound: usize,
    /// Files skipped because their base name is not a marker.
    pub files_ignored: usize,
    /// Everything that resolved to less than what the tree asked for.
    pub diagnostics: Vec<Diagnostic>,
}

impl LoadReport {
    /// Fold a child subtree's report into this one.
    pub fn merge(&mut self, other: LoadReport) {
        self.nodes_mounted += other.nodes_mounted;
        self.handlers_bound += other.handlers_bound;
        self.files_ignored += other.files_ignored;
        self.diagnostics.extend(other.diagnostics);
    }

    /// True if every marker resolved and every directory was readable.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// One contained failure, tied to the registry key (or directory path) that
/// produced it.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    /// Root-relative key of the marker or directory involved.
    pub key: String,
    pub kind: DiagnosticKind,
}

/// What went wrong.
///
/// Absent-by-design is not here: a directory without an `index.*` marker
/// gets its empty router silently. These variants all mean a marker or
/// directory existed and resolved to less than it promised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    /// A method marker with no registry entry; nothing was bound.
    HandlerUnregistered,
    /// A handler factory returned an error; nothing was bound.
    HandlerFailed(String),
    /// An `index.*` marker with no registry entry; an empty router was used.
    IndexUnregistered,
    /// A router factory returned an error; an empty router was used.
    IndexFailed(String),
    /// A subdirectory could not be listed; its subtree was skipped.
    DirUnreadable(String),
    /// A second marker file with the same base name; only the first bound.
    DuplicateMarker,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            DiagnosticKind::HandlerUnregistered => {
                write!(f, "{}: method marker has no registered handler", self.key)
            }
            DiagnosticKind::HandlerFailed(e) => {
                write!(f, "{}: handler factory failed: {}", self.key, e)
            }
            DiagnosticKind::IndexUnregistered => {
                write!(f, "{}: index marker has no registered router", self.key)
            }
            DiagnosticKind::IndexFailed(e) => {
                write!(f, "{}: router factory failed: {}", self.key, e)
            }
            DiagnosticKind::DirUnreadable(e) => {
                write!(f, "{}: directory not readable: {}", self.key, e)
            }
            DiagnosticKind::DuplicateMarker => {
                write!(f, "{}: duplicate marker, only the first was bound", self.key)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_accumulates_counts_and_diagnostics() {
        let mut parent = LoadReport {
            nodes_mounted: 1,
            handlers_bound: 2,
            files_ignored: 0,
            diagnostics: vec![],
        };
        let child = LoadReport {
            nodes_mounted: 2,
            handlers_bound: 1,
            files_ignored: 3,
            diagnostics: vec![Diagnostic {
                key: "api/get".into(),
                kind: DiagnosticKind::HandlerUnregistered,
            }],
        };

        parent.merge(child);
        assert_eq!(parent.nodes_mounted, 3);
        assert_eq!(parent.handlers_bound, 3);
        assert_eq!(parent.files_ignored, 3);
        assert!(!parent.is_clean());
    }
}
