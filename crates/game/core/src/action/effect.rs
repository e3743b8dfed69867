//! Atomic effects: the only way skills and rules describe world mutations.
//!
//! Effects are pure data. The pipeline in [`crate::effect`] expands them
//! through interceptors and folds them into state in emission order.

use crate::state::{
    Actor, ActorId, CompanionMode, HexDirection, ItemKind, Point, SkillId, StatusKind,
    VisualEvent,
};

/// Who a damage effect hits: a known actor, or whoever stands on a cell when
/// the effect is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectTarget {
    Actor(ActorId),
    Cell(Point),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CooldownChange {
    Set(u32),
    Delta(i32),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AtomicEffect {
    Displacement {
        target: ActorId,
        from: Point,
        to: Point,
        /// Set for pushes and slides; unset for voluntary movement.
        forced: bool,
    },
    Damage {
        target: EffectTarget,
        amount: u32,
        reason: String,
    },
    Heal {
        target: ActorId,
        amount: u32,
    },
    ApplyStatus {
        target: ActorId,
        kind: StatusKind,
        duration: u32,
    },
    SpawnItem {
        kind: ItemKind,
        position: Point,
    },
    PickupItem {
        kind: ItemKind,
        position: Point,
    },
    SpawnActor {
        actor: Box<Actor>,
    },
    ModifyCooldown {
        actor: ActorId,
        skill_id: SkillId,
        change: CooldownChange,
    },
    /// A pushed unit hit a wall or an immovable unit.
    Impact {
        target: ActorId,
        damage: u32,
        direction: HexDirection,
    },
    /// A pushed unit was driven into lava at `position`.
    LavaSink {
        target: ActorId,
        position: Point,
    },
    Juice {
        event: VisualEvent,
    },
    Message {
        text: String,
    },
    PlaceTrap {
        position: Point,
        owner: ActorId,
        damage: u32,
    },
    TriggerTrap {
        position: Point,
    },
    SetStealth {
        target: ActorId,
        turns: u32,
    },
    UpdateCompanion {
        target: ActorId,
        mode: CompanionMode,
    },
    SetTelegraph {
        actor: ActorId,
        skill_id: SkillId,
        target: Point,
    },
    ClearTelegraph {
        actor: ActorId,
    },
    PlaceFire {
        position: Point,
        duration: u32,
    },
}

impl AtomicEffect {
    pub fn damage(target: ActorId, amount: u32, reason: impl Into<String>) -> Self {
        Self::Damage {
            target: EffectTarget::Actor(target),
            amount,
            reason: reason.into(),
        }
    }

    pub fn damage_cell(position: Point, amount: u32, reason: impl Into<String>) -> Self {
        Self::Damage {
            target: EffectTarget::Cell(position),
            amount,
            reason: reason.into(),
        }
    }

    pub fn step(target: ActorId, from: Point, to: Point) -> Self {
        Self::Displacement {
            target,
            from,
            to,
            forced: false,
        }
    }

    pub fn message(text: impl Into<String>) -> Self {
        Self::Message { text: text.into() }
    }

    pub fn status(target: ActorId, kind: StatusKind, duration: u32) -> Self {
        Self::ApplyStatus {
            target,
            kind,
            duration,
        }
    }

    /// Tag name used in logs and diagnostics.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Displacement { .. } => "Displacement",
            Self::Damage { .. } => "Damage",
            Self::Heal { .. } => "Heal",
            Self::ApplyStatus { .. } => "ApplyStatus",
            Self::SpawnItem { .. } => "SpawnItem",
            Self::PickupItem { .. } => "PickupItem",
            Self::SpawnActor { .. } => "SpawnActor",
            Self::ModifyCooldown { .. } => "ModifyCooldown",
            Self::Impact { .. } => "Impact",
            Self::LavaSink { .. } => "LavaSink",
            Self::Juice { .. } => "Juice",
            Self::Message { .. } => "Message",
            Self::PlaceTrap { .. } => "PlaceTrap",
            Self::TriggerTrap { .. } => "TriggerTrap",
            Self::SetStealth { .. } => "SetStealth",
            Self::UpdateCompanion { .. } => "UpdateCompanion",
            Self::SetTelegraph { .. } => "SetTelegraph",
            Self::ClearTelegraph { .. } => "ClearTelegraph",
            Self::PlaceFire { .. } => "PlaceFire",
        }
    }
}
