//! Aura - workspace audit engine and CLI
//!
//! A local-first auditor that scans a workspace for leaked credentials,
//! loose `.env` permissions, oversized files, and developer activity, and
//! grades the result with a bloat/complexity heuristic. Each run is a fresh
//! computation; the only persistent state is a pair of append-only journals
//! under `.aura/`.

pub mod activity;
pub mod advisor;
pub mod carbon;
pub mod cli;
pub mod config;
pub mod models;
pub mod probe;
pub mod report;
pub mod scanners;
pub mod walker;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging. `RUST_LOG` wins over the CLI flag when set.
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}
