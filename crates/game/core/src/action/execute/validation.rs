//! Intent validation, run before any skill code.
//!
//! Order matters: WAIT never reaches this module, ownership is checked before
//! registration, and target resolution runs last so a declined intent never
//! inspects the board.

use crate::action::{ActionError, Intent};
use crate::env::{GameEnv, SkillDefinition, SkillKind};
use crate::state::{Actor, GameState, Point, SkillSlot, StatusKind};

/// An intent that passed validation, with its target resolved.
pub(super) struct Validated<'s, 'e> {
    pub actor: &'s Actor,
    pub slot: &'s SkillSlot,
    pub skill: &'e dyn SkillDefinition,
    pub target: Option<Point>,
}

pub(super) fn pre_validate<'s, 'e>(
    intent: &Intent,
    state: &'s GameState,
    env: &GameEnv<'e>,
) -> Result<Validated<'s, 'e>, ActionError> {
    let actor = state
        .actor(intent.actor_id)
        .filter(|actor| actor.is_alive())
        .ok_or(ActionError::ActorNotFound(intent.actor_id))?;

    let slot = actor
        .skill(&intent.skill_id)
        .ok_or_else(|| ActionError::SkillNotOwned(intent.skill_id.clone()))?;

    let skill = env
        .skills
        .skill(&intent.skill_id)
        .ok_or_else(|| ActionError::UnknownSkill(intent.skill_id.clone()))?;
    let base = skill.base();

    if base.passive {
        return Err(ActionError::PassiveSkill {
            skill_id: intent.skill_id.clone(),
        });
    }
    if !slot.is_ready() {
        return Err(ActionError::OnCooldown {
            skill_id: intent.skill_id.clone(),
            remaining: slot.current_cooldown,
        });
    }
    if base.kind == SkillKind::Movement && actor.has_status(StatusKind::Rooted) {
        return Err(ActionError::Rooted {
            skill_id: intent.skill_id.clone(),
        });
    }

    let target = resolve_target(intent, state, base.needs_target)?;

    Ok(Validated {
        actor,
        slot,
        skill,
        target,
    })
}

/// Explicit hex first, then the live position of the target actor.
fn resolve_target(
    intent: &Intent,
    state: &GameState,
    needs_target: bool,
) -> Result<Option<Point>, ActionError> {
    if intent.target_hex.is_some() || !needs_target {
        return Ok(intent.target_hex);
    }
    intent
        .target_actor
        .and_then(|id| state.actor(id))
        .filter(|target| target.is_alive())
        .map(|target| Some(target.position))
        .ok_or(ActionError::NoValidTarget)
}
