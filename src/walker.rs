//! Workspace file enumeration
//!
//! Wraps the `ignore` walker with a fixed set of pruned directory names.
//! Metadata failures skip the single file involved; nothing in here aborts
//! a scan. Traversal order is whatever the walker yields; callers sort for
//! themselves.

use crate::models::FileRecord;
use chrono::{DateTime, Utc};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory names never descended into: version control, dependency
/// caches, virtual environments, build output, and Aura's own journals.
pub const EXCLUDED_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "node_modules",
    ".venv",
    "venv",
    "__pycache__",
    ".pytest_cache",
    "target",
    "dist",
    "build",
    ".aura",
];

pub struct WorkspaceWalker {
    root: PathBuf,
    excluded: Vec<String>,
}

impl WorkspaceWalker {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            excluded: EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
        }
    }

    /// Extra directory names to prune, on top of the built-in set.
    pub fn with_excluded(mut self, extra: &[String]) -> Self {
        self.excluded.extend(extra.iter().cloned());
        self
    }

    /// Enumerate every reachable regular file with its metadata.
    pub fn collect(&self) -> Vec<FileRecord> {
        let excluded = self.excluded.clone();
        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .filter_entry(move |entry| {
                if entry.file_type().map_or(false, |t| t.is_dir()) {
                    let name = entry.file_name().to_string_lossy();
                    !excluded.iter().any(|d| name == d.as_str())
                } else {
                    true
                }
            })
            .build();

        let mut records = Vec::new();
        for entry in walker.filter_map(|e| e.ok()) {
            if !entry.file_type().map_or(false, |t| t.is_file()) {
                continue;
            }
            match file_record(entry.path()) {
                Some(record) => records.push(record),
                None => debug!("skipping unreadable entry: {}", entry.path().display()),
            }
        }
        records
    }
}

fn file_record(path: &Path) -> Option<FileRecord> {
    let meta = std::fs::metadata(path).ok()?;
    let modified = meta.modified().ok().map(DateTime::<Utc>::from)?;
    Some(FileRecord {
        path: path.to_path_buf(),
        modified,
        size_bytes: meta.len(),
        mode: mode_bits(&meta),
    })
}

#[cfg(unix)]
fn mode_bits(meta: &std::fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o777
}

#[cfg(not(unix))]
fn mode_bits(_meta: &std::fs::Metadata) -> u32 {
    0
}
