//! Story journal command

use crate::activity::{self, ActivityParams};
use crate::advisor::{self, fallback, Advisor};
use crate::carbon::journal;
use crate::config::AuraConfig;
use crate::report;
use crate::walker::WorkspaceWalker;
use anyhow::Result;
use chrono::{Local, Utc};
use console::{style, Style};
use std::path::Path;
use tracing::warn;

pub fn run(root: &Path, config: &AuraConfig, advisor: Option<&dyn Advisor>) -> Result<()> {
    report::banner(
        "📖",
        "Aura Story",
        "Code story generation started...",
        &Style::new().blue(),
    );

    let records = WorkspaceWalker::new(root)
        .with_excluded(&config.scan.exclude)
        .collect();
    let summary = activity::analyze(&records, Utc::now(), &ActivityParams::default());

    let prompt = story_prompt(&summary);
    let (prose, live) = advisor::advise_or(advisor, &prompt, fallback::STORY);
    if !live {
        println!(
            "  {}",
            style("Note: assistant unavailable, writing a stock entry.").yellow()
        );
    }

    println!("\n{}\n", prose);

    let journal_path = journal::story_journal_path(root);
    match journal::append_story(&journal_path, &prose, Local::now()) {
        Ok(()) => println!(
            "  Story appended to {}",
            style(journal_path.display()).cyan()
        ),
        Err(err) => {
            warn!("could not update story journal: {err:#}");
            println!("  {}", style("Warning: story journal not updated.").yellow());
        }
    }

    Ok(())
}

fn story_prompt(summary: &activity::ActivitySummary) -> String {
    format!(
        "Write a short (three sentences max) narrative journal entry about today's work in \
this workspace: {} files total, {} touched in the last day, focus state {}.",
        summary.total_files,
        summary.quick.touched_24h,
        summary.focus_state.label()
    )
}
