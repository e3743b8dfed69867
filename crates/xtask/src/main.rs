//! Development tasks for the hexbound workspace
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Simulate, Validate};
use tracing_subscriber::EnvFilter;

/// Development tasks for hexbound
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for hexbound", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Validate a JSON replay file
    Validate(Validate),

    /// Re-simulate a replay from a seed and print the final digest
    Simulate(Simulate),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Validate(cmd) => cmd.execute(),
        Command::Simulate(cmd) => cmd.execute(),
    }
}
