//! Command implementations for xtask

mod simulate;
mod validate;

pub use simulate::Simulate;
pub use validate::Validate;

/// Output format shared by the replay commands
#[derive(Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Summary,
    /// JSON report on stdout
    Json,
}
