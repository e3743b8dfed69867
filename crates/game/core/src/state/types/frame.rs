use super::SkillId;

/// Blocking interrupt that halts the turn loop until resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PendingFrame {
    /// The player reached the stairs; acknowledging descends one floor.
    StairsTransition { floor: u32 },
    /// The player reached a shrine and must pick one of `options`.
    ShrineChoice { options: Vec<UpgradeOption> },
    RunWon { floor: u32 },
    RunLost { turn: u32 },
}

impl PendingFrame {
    pub fn kind(&self) -> FrameKind {
        match self {
            Self::StairsTransition { .. } => FrameKind::StairsTransition,
            Self::ShrineChoice { .. } => FrameKind::ShrineChoice,
            Self::RunWon { .. } => FrameKind::RunWon,
            Self::RunLost { .. } => FrameKind::RunLost,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::AsRefStr, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FrameKind {
    StairsTransition,
    ShrineChoice,
    RunWon,
    RunLost,
}

/// One upgrade offered by a shrine.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpgradeOption {
    pub skill_id: SkillId,
    pub upgrade: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        !matches!(self, Self::Playing)
    }
}
