//! Validate replay files without running them.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;
use hexbound_runtime::read_replay_file;

use super::OutputFormat;

/// Validate a JSON replay file
#[derive(Parser)]
pub struct Validate {
    /// Path to the replay (a JSON array of actions)
    #[arg(value_name = "FILE")]
    path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

impl Validate {
    pub fn execute(self) -> Result<()> {
        let report = read_replay_file(&self.path)?;

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Summary => {
                println!("{} {}", style("Replay:").bold().cyan(), self.path.display());
                println!(
                    "{} {}",
                    style("Accepted actions:").bold().cyan(),
                    report.actions.len()
                );

                let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
                for action in &report.actions {
                    *counts.entry(action.type_name()).or_default() += 1;
                }
                for (kind, count) in &counts {
                    println!("  {kind:<16} {count}");
                }

                if report.valid {
                    println!("{}", style("✓ Replay is valid").green());
                } else {
                    println!();
                    for error in &report.errors {
                        println!("  {} {error}", style("✗").red());
                    }
                }
            }
        }

        if !report.valid {
            anyhow::bail!("replay has {} invalid entries", report.errors.len());
        }
        Ok(())
    }
}
