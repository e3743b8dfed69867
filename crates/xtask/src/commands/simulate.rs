//! Re-simulate a replay and print the resulting digest.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;
use hexbound_runtime::{RuntimeConfig, read_replay_file, simulate};

use super::OutputFormat;

/// Re-simulate a replay from a seed
#[derive(Parser)]
pub struct Simulate {
    /// Path to the replay (a JSON array of actions)
    #[arg(value_name = "FILE")]
    path: PathBuf,

    /// Run seed (defaults to HEXBOUND_SEED, then the built-in seed)
    #[arg(short, long)]
    seed: Option<String>,

    /// Expected digest; the command fails when the result differs
    #[arg(long, value_name = "HEX")]
    expect: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        let config = RuntimeConfig::from_env();
        let seed = self.seed.unwrap_or_else(|| config.seed.clone());
        let actions = read_replay_file(&self.path)?.into_actions()?;

        let report = simulate(&seed, &actions, &config)?;
        let state = &report.state;

        match self.format {
            OutputFormat::Json => {
                let summary = serde_json::json!({
                    "seed": seed,
                    "actions": actions.len(),
                    "skipped": report.skipped,
                    "stop": format!("{:?}", report.stop),
                    "floor": state.floor,
                    "turn": state.turn_number,
                    "status": state.status,
                    "player_hp": state.player.hp,
                    "kills": state.kills,
                    "digest": report.digest,
                });
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
            OutputFormat::Summary => {
                println!("{} {}", style("Seed:").bold().cyan(), seed);
                println!(
                    "{} {} ({} skipped)",
                    style("Actions:").bold().cyan(),
                    actions.len(),
                    report.skipped
                );
                println!("{} {:?}", style("Stopped:").bold().cyan(), report.stop);
                println!(
                    "{} floor {}, turn {}, {:?}",
                    style("State:").bold().cyan(),
                    state.floor,
                    state.turn_number,
                    state.status
                );
                println!(
                    "{} {}/{} hp, {} kills",
                    style("Player:").bold().cyan(),
                    state.player.hp,
                    state.player.max_hp,
                    state.kills
                );
                println!("{} {}", style("Digest:").bold().cyan(), report.digest);
            }
        }

        if let Some(expected) = self.expect {
            if !expected.eq_ignore_ascii_case(&report.digest) {
                anyhow::bail!("digest mismatch: expected {expected}, got {}", report.digest);
            }
            println!("{}", style("✓ Digest matches").green());
        }
        Ok(())
    }
}
