//! Ecosystem footprint command

use crate::advisor::{self, fallback, Advisor};
use crate::carbon::{self, journal};
use crate::config::AuraConfig;
use crate::report;
use crate::scanners::bloat::{BloatReport, BloatScanner};
use anyhow::Result;
use chrono::Local;
use console::{style, Style};
use std::path::Path;
use tracing::warn;

const PATH_COLUMN: usize = 44;

pub fn run(
    root: &Path,
    config: &AuraConfig,
    top: usize,
    max_size_mb: f64,
    advisor: Option<&dyn Advisor>,
) -> Result<()> {
    report::banner(
        "🌍",
        "Aura Eco",
        "Dependency ecosystem analysis started...",
        &Style::new().cyan(),
    );

    let scan = BloatScanner::new(root)
        .with_top_n(top)
        .with_threshold(max_size_mb)
        .with_excluded(&config.scan.exclude)
        .scan();

    if scan.entries.is_empty() {
        println!("{}", style("No files found to rank.").dim());
        return Ok(());
    }

    let col = PATH_COLUMN;
    println!("  {:<col$} {:>10}  Impact", "File", "Size (MB)");
    for entry in &scan.entries {
        let impact = match entry.impact {
            crate::models::Impact::Ok => style(entry.impact.label()).green(),
            crate::models::Impact::EnergyHeavy => style(entry.impact.label()).red().bold(),
        };
        println!(
            "  {:<col$} {:>10.2}  {}",
            report::shorten_path(&entry.path.to_string_lossy(), col),
            entry.size_mb,
            impact
        );
    }
    println!("  Total displayed: {:.2} MB", scan.total_displayed_mb);

    let prompt = complexity_prompt(&scan);
    let (commentary, live) = advisor::advise_or(advisor, &prompt, fallback::COMPLEXITY);
    if !live {
        println!(
            "\n  {}",
            style("Note: assistant unavailable, grading with built-in commentary.").yellow()
        );
    }

    let grade = carbon::grade(&scan.entries, &commentary);
    println!(
        "\n  Carbon Grade: {}",
        report::grade_style(grade).apply_to(grade.letter())
    );

    let journal_path = journal::carbon_journal_path(root);
    match journal::record_audit(&journal_path, grade, &scan.entries, &commentary, Local::now()) {
        Ok((verdict, previous)) => match previous {
            Some(prev) => println!("  Progress: {} (was {})", verdict.label(), prev),
            None => println!("  Progress: {}", verdict.label()),
        },
        Err(err) => {
            // Results above are already on screen; losing the ledger entry
            // is only worth a warning.
            warn!("could not update carbon journal: {err:#}");
            println!(
                "  {}",
                style("Warning: carbon journal not updated.").yellow()
            );
        }
    }

    Ok(())
}

fn complexity_prompt(scan: &BloatReport) -> String {
    let mut prompt = String::from(
        "Review the heaviest files in this workspace and comment on the likely algorithmic \
complexity of the code that produces or consumes them. Mention nested loops or quadratic \
behavior if you suspect any.\n",
    );
    for entry in &scan.entries {
        prompt.push_str(&format!(
            "- {} ({:.1} MB)\n",
            entry.path.display(),
            entry.size_mb
        ));
    }
    prompt
}
