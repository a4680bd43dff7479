//! Development tasks for the component pack
//!
//! Run with: `cargo xtask <command>`

mod commands;
mod dirs;

use anyhow::Result;
use clap::Parser;
use commands::{Components, Simulate, Validate};
use tracing_subscriber::EnvFilter;

/// Development tasks for the component pack
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for the tactics component pack", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Resolve every combat of a scenario and print the playback
    Simulate(Simulate),

    /// Load all content and report problems
    Validate(Validate),

    /// List the built-in components and their hook points
    Components(Components),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for PACK_DATA_DIR and RUST_LOG)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate(cmd) => cmd.execute(),
        Command::Validate(cmd) => cmd.execute(),
        Command::Components(cmd) => cmd.execute(),
    }
}
