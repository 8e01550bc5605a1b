//! CLI command definitions and handlers

mod check;
mod eco;
mod pulse;
mod story;

use crate::advisor::{Advisor, CopilotAdvisor};
use crate::config::AuraConfig;
use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Aura - workspace audit and developer telemetry
///
/// Scans the current directory for leaked secrets, loose `.env`
/// permissions, oversized files, and developer activity, and grades the
/// result. All scanning is local; only the optional AI assistant leaves
/// the machine.
#[derive(Parser, Debug)]
#[command(name = "aura")]
#[command(
    version,
    about = "Audit a workspace for leaked secrets, bloat, and developer activity",
    after_help = "\
Examples:
  aura check                Scan for leaked credentials and .env permissions
  aura pulse                Show the edit-recency histogram and idle verdict
  aura eco                  Rank the heaviest files and grade the workspace
  aura story                Append a prose snapshot to the story journal
  aura eco --top 10         Widen the bloat table
  aura pulse --force-idle   Pretend the session is idle"
)]
pub struct Cli {
    /// Workspace root to audit (default: current directory)
    #[arg(global = true, long, default_value = ".")]
    pub path: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Skip the AI assistant and use built-in fallback text
    #[arg(long, global = true)]
    pub no_ai: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan for leaked credentials and unsafe .env permissions
    #[command(alias = "sec")]
    Check,

    /// Analyze file-edit recency and terminal idle state
    #[command(alias = "health")]
    Pulse {
        /// Hours of history in the recency histogram
        #[arg(long)]
        window_hours: Option<f64>,

        /// Minutes without edits before the session counts as idle
        #[arg(long)]
        idle_threshold: Option<f64>,

        /// Treat the session as idle regardless of observed activity
        #[arg(long)]
        force_idle: bool,

        /// Skip terminal session probing
        #[arg(long)]
        no_terminal: bool,
    },

    /// Rank the heaviest files and grade the workspace's footprint
    #[command(alias = "deps")]
    Eco {
        /// How many files to rank
        #[arg(long)]
        top: Option<usize>,

        /// Size in MB above which a file counts as energy-heavy
        #[arg(long)]
        max_size_mb: Option<f64>,
    },

    /// Append a prose snapshot of the workspace to the story journal
    #[command(alias = "doc")]
    Story,
}

/// Live advisor for this invocation, when enabled and reachable.
fn build_advisor(cli: &Cli, config: &AuraConfig) -> Option<CopilotAdvisor> {
    if cli.no_ai || !config.advisor.enabled {
        return None;
    }
    let advisor = CopilotAdvisor::with_binary(&config.advisor.binary);
    if !advisor.available() {
        tracing::info!("assistant `{}` not reachable, using fallbacks", config.advisor.binary);
        return None;
    }
    Some(advisor)
}

fn as_dyn(advisor: &Option<CopilotAdvisor>) -> Option<&dyn Advisor> {
    advisor.as_ref().map(|a| a as &dyn Advisor)
}

pub fn run(cli: Cli) -> Result<()> {
    let config = AuraConfig::load(&cli.path);

    match cli.command {
        Some(Commands::Check) => {
            let advisor = build_advisor(&cli, &config);
            let dirty = check::run(&cli.path, &config, as_dyn(&advisor))?;
            if dirty {
                std::process::exit(1);
            }
        }
        Some(Commands::Pulse {
            window_hours,
            idle_threshold,
            force_idle,
            no_terminal,
        }) => {
            let advisor = build_advisor(&cli, &config);
            pulse::run(
                &cli.path,
                &config,
                pulse::PulseOptions {
                    window_hours: window_hours.unwrap_or(config.activity.window_hours),
                    idle_threshold: idle_threshold.unwrap_or(config.activity.idle_threshold_minutes),
                    force_idle,
                    no_terminal,
                },
                as_dyn(&advisor),
            )?;
        }
        Some(Commands::Eco { top, max_size_mb }) => {
            // The complexity path gets the one shortened retry.
            let advisor = build_advisor(&cli, &config).map(CopilotAdvisor::with_shortened_retry);
            eco::run(
                &cli.path,
                &config,
                top.unwrap_or(config.bloat.top_n),
                max_size_mb.unwrap_or(config.bloat.max_size_mb),
                as_dyn(&advisor),
            )?;
        }
        Some(Commands::Story) => {
            let advisor = build_advisor(&cli, &config);
            story::run(&cli.path, &config, as_dyn(&advisor))?;
        }
        None => {
            Cli::command().print_help()?;
            println!();
        }
    }
    Ok(())
}
