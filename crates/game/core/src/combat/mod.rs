//! Turn-window combat rules: status ticking, telegraph resolution and the
//! auto-attack passive.
//!
//! These helpers compute effects or tick counters for one actor; the turn
//! loop decides when each runs.

pub mod auto_attack;
pub mod status;
pub mod telegraph;

pub use auto_attack::{auto_attack_effects, persistent_targets};
pub use status::{TurnStart, end_of_turn_effects, start_of_turn, tick_end_of_turn, tick_tiles};
pub use telegraph::{TelegraphResolution, danger_tiles, resolve_telegraph};
