//! Status effects carried by actors.
//!
//! Durations count the owner's turns. Each status is ticked in exactly one of
//! the two per-turn windows of its owner (start or end of turn) and removed
//! once its duration reaches zero.

/// Types of status effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::AsRefStr, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum StatusKind {
    /// Skips the turn; the strategy is never consulted.
    Stunned,
    /// Cannot take movement skills.
    Rooted,
    /// Loses 1 hp at the end of each turn.
    Poisoned,
    /// Marked for a follow-up strike; purely informational for the rules.
    Marked,
    /// Grants 1 temporary armor at the start of each turn.
    Fortified,
}

impl StatusKind {
    /// Window in which the status ticks.
    pub const fn window(self) -> StatusWindow {
        match self {
            Self::Stunned | Self::Fortified => StatusWindow::StartOfTurn,
            Self::Rooted | Self::Poisoned | Self::Marked => StatusWindow::EndOfTurn,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusWindow {
    StartOfTurn,
    EndOfTurn,
}

/// A single status instance. `id` is generated from the state's status
/// counter when the status is applied.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub id: String,
    pub kind: StatusKind,
    pub duration: u32,
}

impl StatusEffect {
    pub fn new(id: impl Into<String>, kind: StatusKind, duration: u32) -> Self {
        Self {
            id: id.into(),
            kind,
            duration,
        }
    }
}
