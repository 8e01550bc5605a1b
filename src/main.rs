//! Aura - workspace audit CLI

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = aura::cli::Cli::parse();
    aura::init_tracing(&cli.log_level);
    aura::cli::run(cli)
}
