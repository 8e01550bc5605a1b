//! Security check command

use crate::advisor::{self, fallback, Advisor};
use crate::config::AuraConfig;
use crate::report;
use anyhow::Result;
use console::{style, Style};
use std::path::Path;

use crate::scanners::secrets::SecretScanner;

const REMEDIATION_PROMPT: &str = "How do I remove a leaked secret from git history safely?";

/// Run the security scan. Returns whether anything was found, so the caller
/// can pick the exit code.
pub fn run(root: &Path, config: &AuraConfig, advisor: Option<&dyn Advisor>) -> Result<bool> {
    report::banner(
        "🛡️ ",
        "Aura Security",
        "Security scan started...",
        &Style::new().red(),
    );

    let scan = SecretScanner::new(root)
        .with_excluded(&config.scan.exclude)
        .scan();

    if scan.is_clean() {
        println!("{}", style("✓ No security issues detected!").green().bold());
        return Ok(false);
    }

    if !scan.findings.is_empty() {
        println!(
            "{}",
            style(format!(
                "⚠️  Found {} potential secret(s):",
                scan.findings.len()
            ))
            .red()
            .bold()
        );
        for finding in &scan.findings {
            println!(
                "   • {}: {} ({})",
                finding.path.display(),
                finding.kind.label(),
                finding.masked_value()
            );
        }

        let (advice, live) = advisor::advise_or(advisor, REMEDIATION_PROMPT, fallback::REMEDIATION);
        if !live {
            println!(
                "\n{}",
                style("Note: assistant unavailable, showing built-in remediation steps.").yellow()
            );
        }
        print!("{}", report::advice_box("AURA AI ADVICE", &advice));
    }

    if !scan.env_issues.is_empty() {
        println!(
            "\n{}",
            style(format!(
                "⚠️  Found {} .env file(s) with loose permissions:",
                scan.env_issues.len()
            ))
            .red()
            .bold()
        );
        for issue in &scan.env_issues {
            println!(
                "   • {}: 0o{:o} (should be 0o600)",
                issue.path.display(),
                issue.mode
            );
        }
    }

    Ok(true)
}
