//! Session driver for the hexbound rules core.
//!
//! This crate wires the core engine to the reference content and exposes the
//! pieces a front end or tooling needs:
//! - [`session`] owns one run: dispatch, undo history and floor transitions
//! - [`replay`] validates JSON action logs and re-simulates them from a seed
//! - [`diagnostics`] forwards core diagnostics to `tracing`
//! - [`config`] reads runtime settings from the environment
//! - [`utils`] computes state digests for determinism checks
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod replay;
pub mod session;
pub mod utils;

pub use config::RuntimeConfig;
pub use diagnostics::TracingSink;
pub use error::{ReplayError, Result, RuntimeError};
pub use replay::{
    ReplayReport, SimulationReport, parse_replay, read_replay_file, simulate, simulate_with,
    validate_replay,
};
pub use session::Session;
pub use utils::hash::hash_game_state;
