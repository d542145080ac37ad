//! The closed set of method marker names.

use axum::routing::MethodFilter;
use serde::Serialize;

/// A request method a marker file can bind.
///
/// Marker base names are matched exactly (lowercase); anything outside this
/// set is not a method marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    /// Matches every method; bound as the fallback slot of the node's
    /// method router, so explicit methods take precedence.
    All,
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl MethodKind {
    /// Parse a marker file's base name (extension already stripped).
    pub fn from_stem(stem: &str) -> Option<Self> {
        match stem {
            "all" => Some(Self::All),
            "get" => Some(Self::Get),
            "post" => Some(Self::Post),
            "put" => Some(Self::Put),
            "delete" => Some(Self::Delete),
            "patch" => Some(Self::Patch),
            _ => None,
        }
    }

    /// The marker name this method is spelled as on disk.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Delete => "delete",
            Self::Patch => "patch",
        }
    }

    /// The axum filter for this method, or `None` for [`MethodKind::All`],
    /// which binds via the fallback slot instead.
    pub fn filter(self) -> Option<MethodFilter> {
        match self {
            Self::All => None,
            Self::Get => Some(MethodFilter::GET),
            Self::Post => Some(MethodFilter::POST),
            Self::Put => Some(MethodFilter::PUT),
            Self::Delete => Some(MethodFilter::DELETE),
            Self::Patch => Some(MethodFilter::PATCH),
        }
    }
}

impl std::fmt::Display for MethodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_the_closed_set() {
        for (stem, kind) in [
            ("all", MethodKind::All),
            ("get", MethodKind::Get),
            ("post", MethodKind::Post),
            ("put", MethodKind::Put),
            ("delete", MethodKind::Delete),
            ("patch", MethodKind::Patch),
        ] {
            assert_eq!(MethodKind::from_stem(stem), Some(kind));
            assert_eq!(kind.as_str(), stem);
        }
    }

    #[test]
    fn rejects_everything_else() {
        assert_eq!(MethodKind::from_stem("options"), None);
        assert_eq!(MethodKind::from_stem("head"), None);
        assert_eq!(MethodKind::from_stem("GET"), None); // exact lowercase only
        assert_eq!(MethodKind::from_stem("index"), None);
        assert_eq!(MethodKind::from_stem(""), None);
    }

    #[test]
    fn only_all_lacks_a_filter() {
        assert!(MethodKind::All.filter().is_none());
        assert!(MethodKind::Get.filter().is_some());
        assert!(MethodKind::Patch.filter().is_some());
    }
}
