//! Append-only audit journals
//!
//! Two flat markdown files under `.aura/`: the carbon ledger with one
//! `### Audit - <timestamp>` block per run, and the story log. Prior grades
//! are always re-read from disk, never from memory; a missing or garbled
//! file just means no history.

use crate::models::{BloatEntry, CarbonGrade};
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use regex::Regex;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;

/// Journal directory name inside the workspace root.
pub const JOURNAL_DIR: &str = ".aura";
pub const CARBON_JOURNAL: &str = "carbon.md";
pub const STORY_JOURNAL: &str = "story.md";

static GRADE_LINE: OnceLock<Regex> = OnceLock::new();

fn grade_line_pattern() -> &'static Regex {
    GRADE_LINE.get_or_init(|| Regex::new(r"(?m)Carbon Grade:\s*([A-F])\b").unwrap())
}

pub fn carbon_journal_path(root: &Path) -> PathBuf {
    root.join(JOURNAL_DIR).join(CARBON_JOURNAL)
}

pub fn story_journal_path(root: &Path) -> PathBuf {
    root.join(JOURNAL_DIR).join(STORY_JOURNAL)
}

/// How the new grade compares to the last recorded one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProgressVerdict {
    FirstAudit,
    Improved,
    Regressed,
    Stable,
}

impl ProgressVerdict {
    pub fn from_grades(previous: Option<CarbonGrade>, new: CarbonGrade) -> Self {
        match previous {
            None => ProgressVerdict::FirstAudit,
            Some(prev) => match new.rank().cmp(&prev.rank()) {
                std::cmp::Ordering::Less => ProgressVerdict::Improved,
                std::cmp::Ordering::Greater => ProgressVerdict::Regressed,
                std::cmp::Ordering::Equal => ProgressVerdict::Stable,
            },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProgressVerdict::FirstAudit => "first audit",
            ProgressVerdict::Improved => "improved",
            ProgressVerdict::Regressed => "regressed",
            ProgressVerdict::Stable => "stable",
        }
    }
}

/// Last grade recorded in the journal, when the file exists and any entry
/// parses. Later entries win.
pub fn last_recorded_grade(path: &Path) -> Option<CarbonGrade> {
    let content = std::fs::read_to_string(path).ok()?;
    grade_line_pattern()
        .captures_iter(&content)
        .last()
        .and_then(|caps| CarbonGrade::from_letter(&caps[1]))
}

/// Append a timestamped audit record and report how the grade moved.
///
/// The write is append-only so concurrent runs cannot destroy history.
pub fn record_audit(
    path: &Path,
    grade: CarbonGrade,
    entries: &[BloatEntry],
    complexity_text: &str,
    now: DateTime<Local>,
) -> Result<(ProgressVerdict, Option<CarbonGrade>)> {
    let previous = last_recorded_grade(path);
    let verdict = ProgressVerdict::from_grades(previous, grade);
    debug!(
        "recording audit: grade {}, verdict {}",
        grade,
        verdict.label()
    );

    let block = render_audit(grade, entries, complexity_text, verdict, previous, now);
    append(path, &block)?;
    Ok((verdict, previous))
}

/// Append a timestamped prose entry to the story journal.
pub fn append_story(path: &Path, prose: &str, now: DateTime<Local>) -> Result<()> {
    let mut block = String::new();
    block.push_str(&format!("## {}\n\n", now.format("%Y-%m-%d %H:%M:%S")));
    block.push_str(prose.trim_end());
    block.push_str("\n\n");
    append(path, &block)
}

fn append(path: &Path, block: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create journal directory {}", parent.display()))?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open journal {}", path.display()))?;
    file.write_all(block.as_bytes())
        .with_context(|| format!("cannot append to journal {}", path.display()))?;
    Ok(())
}

fn render_audit(
    grade: CarbonGrade,
    entries: &[BloatEntry],
    complexity_text: &str,
    verdict: ProgressVerdict,
    previous: Option<CarbonGrade>,
    now: DateTime<Local>,
) -> String {
    let mut md = String::new();
    md.push_str(&format!("### Audit - {}\n\n", now.format("%Y-%m-%d %H:%M:%S")));

    if entries.is_empty() {
        md.push_str("No files ranked.\n\n");
    } else {
        md.push_str("| File | Size (MB) | Impact |\n");
        md.push_str("|---|---|---|\n");
        for entry in entries {
            md.push_str(&format!(
                "| {} | {:.2} | {} |\n",
                entry.path.display(),
                entry.size_mb,
                entry.impact.label()
            ));
        }
        md.push('\n');
    }

    let commentary = complexity_text.trim();
    if !commentary.is_empty() {
        md.push_str("Complexity notes:\n\n");
        for line in commentary.lines() {
            md.push_str(&format!("> {}\n", line));
        }
        md.push('\n');
    }

    md.push_str(&format!("Carbon Grade: {}\n", grade));
    match previous {
        Some(prev) => md.push_str(&format!("Progress: {} (was {})\n\n", verdict.label(), prev)),
        None => md.push_str(&format!("Progress: {}\n\n", verdict.label())),
    }
    md
}
