//! Activity pulse command

use crate::activity::{self, terminal, ActivityParams, FocusState, DEFAULT_BUCKETS};
use crate::advisor::{self, fallback, Advisor};
use crate::config::AuraConfig;
use crate::report;
use crate::walker::WorkspaceWalker;
use anyhow::Result;
use chrono::Utc;
use console::{style, Style};
use std::path::Path;

const BAR_WIDTH: usize = 24;

pub struct PulseOptions {
    pub window_hours: f64,
    pub idle_threshold: f64,
    pub force_idle: bool,
    pub no_terminal: bool,
}

pub fn run(
    root: &Path,
    config: &AuraConfig,
    options: PulseOptions,
    advisor: Option<&dyn Advisor>,
) -> Result<()> {
    report::banner(
        "💓",
        "Aura Pulse",
        "Code health analysis started...",
        &Style::new().green(),
    );

    let records = WorkspaceWalker::new(root)
        .with_excluded(&config.scan.exclude)
        .collect();

    let terminal_idle_minutes = if options.no_terminal {
        None
    } else {
        terminal::terminal_idle_minutes(terminal::SESSION_PROBE_TIMEOUT)
    };

    let params = ActivityParams {
        window_hours: options.window_hours,
        buckets: DEFAULT_BUCKETS,
        idle_threshold_minutes: options.idle_threshold,
        terminal_idle_minutes,
        force_idle: options.force_idle,
    };
    let summary = activity::analyze(&records, Utc::now(), &params);

    if summary.total_files == 0 {
        println!("{}", style("No files found to analyze.").dim());
        return Ok(());
    }

    if let (Some(path), Some(minutes)) = (&summary.newest, summary.minutes_since_edit) {
        println!(
            "  Last edit: {} ({} ago)",
            style(path.display()).cyan(),
            report::format_minutes(minutes)
        );
    }

    println!("\n  Edits over the last {:.0}h:", options.window_hours);
    let bars = summary.histogram_bars(BAR_WIDTH);
    for (bucket, bar) in summary.histogram.iter().zip(bars) {
        println!(
            "  {:>4.0}-{:<4.0}m │{:<width$}│ {}",
            bucket.from_minutes,
            bucket.to_minutes,
            "█".repeat(bar),
            bucket.count,
            width = BAR_WIDTH
        );
    }

    let quick = &summary.quick;
    println!(
        "\n  Touched: {} in 5m · {} in 30m · {} in 60m · {} in 24h",
        quick.touched_5m, quick.touched_30m, quick.touched_60m, quick.touched_24h
    );

    let focus_style = match summary.focus_state {
        FocusState::Flow => Style::new().green().bold(),
        FocusState::Steady => Style::new().yellow(),
        FocusState::Rest => Style::new().dim(),
    };
    println!(
        "  Focus: {} ({:.2})",
        focus_style.apply_to(summary.focus_state.label()),
        summary.focus_score
    );

    if let Some(idle_minutes) = terminal_idle_minutes {
        println!(
            "  Terminal: {} idle",
            report::format_minutes(idle_minutes)
        );
    }

    if summary.is_idle {
        println!("\n  {}", style("Session looks idle.").yellow());
        let prompt = wellness_prompt(&summary);
        let (suggestion, _) = advisor::advise_or(advisor, &prompt, fallback::WELLNESS);
        print!("{}", report::advice_box("AURA WELLNESS", &suggestion));
    } else {
        println!("\n  {}", style("Session is active.").green());
    }

    Ok(())
}

fn wellness_prompt(summary: &activity::ActivitySummary) -> String {
    let minutes = summary.minutes_since_edit.unwrap_or(0.0);
    format!(
        "A developer has been idle for about {:.0} minutes. Suggest a two-sentence break \
activity before they return to work.",
        minutes
    )
}
