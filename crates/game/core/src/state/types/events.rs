//! Side-channel records for presentation layers.
//!
//! The rules only append to these lists; nothing in the core reads them back.

use super::{ActorId, Point, SkillId, StatusKind};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VisualEvent {
    MovementTrace {
        actor: ActorId,
        from: Point,
        to: Point,
        forced: bool,
    },
    Shake {
        intensity: u32,
    },
    Flash {
        position: Point,
    },
    CombatText {
        position: Point,
        text: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SimulationEvent {
    Damaged {
        actor: ActorId,
        amount: u32,
        reason: String,
    },
    Healed {
        actor: ActorId,
        amount: u32,
    },
    StatusApplied {
        actor: ActorId,
        kind: StatusKind,
    },
    Died {
        actor: ActorId,
    },
    Telegraphed {
        actor: ActorId,
        skill_id: SkillId,
        target: Point,
    },
    TrapTriggered {
        position: Point,
    },
}
