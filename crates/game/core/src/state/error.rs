//! State management errors.
//!
//! Errors related to actor bookkeeping and capacity limits.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{ActorId, Point};

/// Errors that occur during game state operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    /// Actor list is full (max capacity reached).
    #[error("Actor list is full (max: {max})")]
    ActorListFull { max: usize },

    /// Actor id allocation overflow (all ids exhausted).
    #[error("Actor id overflow (current: {current})")]
    ActorIdOverflow { current: u32 },

    /// Position is already occupied by another actor.
    #[error("Position {position} is already occupied by actor {occupant}")]
    PositionOccupied { position: Point, occupant: ActorId },

    /// Position is outside the map bounds.
    #[error("Position {position} is out of bounds")]
    PositionOutOfBounds { position: Point },
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        use StateError::*;
        match self {
            ActorListFull { .. } => ErrorSeverity::Validation,

            // Id overflow cannot be recovered from within a run
            ActorIdOverflow { .. } => ErrorSeverity::Fatal,

            PositionOccupied { .. } | PositionOutOfBounds { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use StateError::*;
        match self {
            ActorListFull { .. } => "STATE_ACTOR_LIST_FULL",
            ActorIdOverflow { .. } => "STATE_ACTOR_ID_OVERFLOW",
            PositionOccupied { .. } => "STATE_POSITION_OCCUPIED",
            PositionOutOfBounds { .. } => "STATE_POSITION_OUT_OF_BOUNDS",
        }
    }
}
