//! Oversized-asset ranking
//!
//! Ranks workspace files by size and labels the ones above the energy-heavy
//! threshold. Only the top entries are kept; the rest of the tree is ignored
//! on purpose.

use crate::models::{BloatEntry, FileRecord, Impact};
use crate::walker::WorkspaceWalker;
use serde::Serialize;
use std::path::PathBuf;

pub const DEFAULT_MAX_SIZE_MB: f64 = 50.0;
pub const DEFAULT_TOP_N: usize = 5;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Structured output of a bloat scan.
#[derive(Debug, Clone, Serialize)]
pub struct BloatReport {
    /// Top-N entries by size, descending. Ties keep enumeration order.
    pub entries: Vec<BloatEntry>,
    /// Sum of the sizes of the returned entries only: the total of the
    /// table actually shown, not the workspace footprint.
    pub total_displayed_mb: f64,
}

pub struct BloatScanner {
    root: PathBuf,
    max_size_mb: f64,
    top_n: usize,
    excluded: Vec<String>,
}

impl BloatScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_size_mb: DEFAULT_MAX_SIZE_MB,
            top_n: DEFAULT_TOP_N,
            excluded: Vec::new(),
        }
    }

    /// Size in MB above which an entry counts as energy-heavy.
    pub fn with_threshold(mut self, max_size_mb: f64) -> Self {
        self.max_size_mb = max_size_mb;
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Extra directory names to prune during the walk.
    pub fn with_excluded(mut self, extra: &[String]) -> Self {
        self.excluded.extend(extra.iter().cloned());
        self
    }

    pub fn scan(&self) -> BloatReport {
        let records = WorkspaceWalker::new(&self.root)
            .with_excluded(&self.excluded)
            .collect();
        self.rank(&records)
    }

    fn rank(&self, records: &[FileRecord]) -> BloatReport {
        let mut sized: Vec<(PathBuf, f64)> = records
            .iter()
            .map(|r| (r.path.clone(), r.size_bytes as f64 / BYTES_PER_MB))
            .collect();
        // Stable sort: equal sizes keep their enumeration order.
        sized.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        sized.truncate(self.top_n);

        let entries: Vec<BloatEntry> = sized
            .into_iter()
            .map(|(path, size_mb)| BloatEntry {
                path,
                size_mb,
                impact: impact_for(size_mb, self.max_size_mb),
            })
            .collect();
        let total_displayed_mb = entries.iter().map(|e| e.size_mb).sum();

        BloatReport {
            entries,
            total_displayed_mb,
        }
    }
}

/// Strictly greater than the threshold; a file of exactly the threshold
/// size is fine.
fn impact_for(size_mb: f64, max_size_mb: f64) -> Impact {
    if size_mb > max_size_mb {
        Impact::EnergyHeavy
    } else {
        Impact::Ok
    }
}
