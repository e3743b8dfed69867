//! Action execution errors.
//!
//! None of these abort the turn loop. The tactical executor converts them into
//! a player-facing message and leaves the turn unconsumed.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{ActorId, SkillId};

/// Errors raised while validating an intent.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("Actor {0} is not in play")]
    ActorNotFound(ActorId),

    #[error("Unknown skill {0}")]
    UnknownSkill(SkillId),

    #[error("{0} is not in the loadout")]
    SkillNotOwned(SkillId),

    #[error("{skill_id} is passive")]
    PassiveSkill { skill_id: SkillId },

    #[error("{skill_id} is cooling down ({remaining} turns)")]
    OnCooldown { skill_id: SkillId, remaining: u32 },

    #[error("Rooted: cannot use {skill_id}")]
    Rooted { skill_id: SkillId },

    #[error("No valid target")]
    NoValidTarget,
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            OnCooldown { .. } | Rooted { .. } | NoValidTarget => ErrorSeverity::Recoverable,
            UnknownSkill(_) | SkillNotOwned(_) | PassiveSkill { .. } => ErrorSeverity::Validation,
            ActorNotFound(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            ActorNotFound(_) => "ACTION_ACTOR_NOT_FOUND",
            UnknownSkill(_) => "ACTION_UNKNOWN_SKILL",
            SkillNotOwned(_) => "ACTION_SKILL_NOT_OWNED",
            PassiveSkill { .. } => "ACTION_PASSIVE_SKILL",
            OnCooldown { .. } => "ACTION_ON_COOLDOWN",
            Rooted { .. } => "ACTION_ROOTED",
            NoValidTarget => "ACTION_NO_VALID_TARGET",
        }
    }
}
