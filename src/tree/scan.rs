//! Single-directory scanning.
//!
//! # Responsibilities
//! - List one route directory: subdirectories, method markers, index marker
//! - Strip extensions and classify base names against the method set
//! - Detect duplicate markers (same base name, different extension)
//!
//! # Design Decisions
//! - Pure data out: no router types, so the CLI can reuse the scanner
//! - Entries sorted by name for platform-independent ordering
//! - First marker wins on duplicates; the rest are reported, not bound

use std::collections::HashSet;
use std::io;
use std::path::Path;

use serde::Serialize;
use tokio::fs;

use crate::tree::method::MethodKind;

/// A recognized method marker file.
#[derive(Debug, Clone, Serialize)]
pub struct MethodFile {
    /// Which method the marker binds.
    pub method: MethodKind,
    /// The on-disk file name, extension included.
    pub file_name: String,
}

/// Everything the assembler needs to know about one route directory.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DirScan {
    /// Child segment names, sorted.
    pub subdirs: Vec<String>,
    /// Method markers directly in this directory, sorted by file name.
    pub methods: Vec<MethodFile>,
    /// File name of the `index.*` marker, if present.
    pub index: Option<String>,
    /// Files that are neither markers nor directories, sorted.
    pub ignored: Vec<String>,
    /// Marker base names that appeared more than once.
    pub duplicates: Vec<String>,
}

/// The base name with a trailing `.ext` stripped; the whole name if there
/// is no dot. A leading-dot file like `.gitkeep` yields an empty stem and
/// is never a marker.
fn stem_of(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, _ext)) => stem,
        None => file_name,
    }
}

/// List one directory and classify its entries.
///
/// Fails only if the directory itself cannot be read; individual entries
/// whose metadata cannot be read are skipped.
pub async fn scan_dir(path: &Path) -> io::Result<DirScan> {
    let mut scan = DirScan::default();
    let mut seen = HashSet::new();

    let mut entries = fs::read_dir(path).await?;
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        let file_type = match entry.file_type().await {
            Ok(ft) => ft,
            Err(e) => {
                tracing::debug!(entry = %name, error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };

        if file_type.is_dir() {
            scan.subdirs.push(name);
            continue;
        }

        let stem = stem_of(&name);
        if stem == "index" {
            if seen.insert(stem.to_owned()) {
                scan.index = Some(name);
            } else {
                scan.duplicates.push(stem.to_owned());
            }
        } else if let Some(method) = MethodKind::from_stem(stem) {
            if seen.insert(stem.to_owned()) {
                scan.methods.push(MethodFile {
                    method,
                    file_name: name,
                });
            } else {
                scan.duplicates.push(stem.to_owned());
            }
        } else {
            scan.ignored.push(name);
        }
    }

    scan.subdirs.sort();
    scan.methods.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    scan.ignored.sort();
    scan.duplicates.sort();
    Ok(scan)
}
