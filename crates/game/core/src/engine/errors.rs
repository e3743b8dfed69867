//! Errors surfaced by frame resolution and action dispatch.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{FrameKind, GameStatus, SkillId};

/// Errors raised while resolving the top pending frame.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrameError {
    #[error("no frame is pending")]
    NothingPending,

    #[error("{resolution} does not resolve a {frame:?} frame")]
    Mismatch {
        frame: FrameKind,
        resolution: String,
    },

    #[error("upgrade {upgrade} for {skill_id} was not offered")]
    UpgradeNotOffered { skill_id: SkillId, upgrade: String },
}

impl GameError for FrameError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NothingPending => "FRAME_NOTHING_PENDING",
            Self::Mismatch { .. } => "FRAME_MISMATCH",
            Self::UpgradeNotOffered { .. } => "FRAME_UPGRADE_NOT_OFFERED",
        }
    }
}

/// Errors raised by [`GameEngine::dispatch`](super::GameEngine::dispatch).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DispatchError {
    #[error("a {0:?} frame must be resolved first")]
    Blocked(FrameKind),

    #[error("the run is over ({0:?})")]
    GameOver(GameStatus),

    #[error("the player's provider does not accept input")]
    NotInteractive,

    #[error(transparent)]
    Frame(#[from] FrameError),
}

impl GameError for DispatchError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Blocked(_) | Self::GameOver(_) => ErrorSeverity::Recoverable,
            Self::NotInteractive => ErrorSeverity::Internal,
            Self::Frame(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Blocked(_) => "DISPATCH_BLOCKED",
            Self::GameOver(_) => "DISPATCH_GAME_OVER",
            Self::NotInteractive => "DISPATCH_NOT_INTERACTIVE",
            Self::Frame(error) => error.error_code(),
        }
    }
}
