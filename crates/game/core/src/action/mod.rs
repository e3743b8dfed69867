//! Action domain: replayable commands, intents, atomic effects and the
//! tactical executor that turns an intent into effects.
//!
//! - `Action`: player-level commands recorded in the command log and replays
//! - `Intent`: one actor's proposed skill use for the current turn
//! - `AtomicEffect`: primitive world mutations emitted by skills
//! - `execute`: intent validation and skill invocation

pub mod effect;
pub mod error;
pub mod execute;
pub mod intent;

pub use effect::{AtomicEffect, CooldownChange, EffectTarget};
pub use error::ActionError;
pub use execute::{Simulation, TacticalExecutor, TacticalResult};
pub use intent::{Intent, IntentMetadata, IntentOutcome};

use crate::state::{Point, SkillId};

/// A command from the player or a replay file, reduced against the state by
/// [`crate::engine::GameEngine::dispatch`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum Action {
    /// Shorthand for `BASIC_MOVE` at `target`.
    Move { target: Point },
    UseSkill {
        skill_id: SkillId,
        #[cfg_attr(feature = "serde", serde(default))]
        target: Option<Point>,
    },
    Wait,
    /// Resumes the loop without a new decision.
    AdvanceTurn,
    /// Acknowledges the top pending frame.
    ResolvePending,
    SelectUpgrade { skill_id: SkillId, upgrade: String },
}

impl Action {
    /// Every accepted value of the `type` tag.
    pub const TYPES: [&'static str; 6] = [
        "MOVE",
        "USE_SKILL",
        "WAIT",
        "ADVANCE_TURN",
        "RESOLVE_PENDING",
        "SELECT_UPGRADE",
    ];

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Move { .. } => "MOVE",
            Self::UseSkill { .. } => "USE_SKILL",
            Self::Wait => "WAIT",
            Self::AdvanceTurn => "ADVANCE_TURN",
            Self::ResolvePending => "RESOLVE_PENDING",
            Self::SelectUpgrade { .. } => "SELECT_UPGRADE",
        }
    }
}
