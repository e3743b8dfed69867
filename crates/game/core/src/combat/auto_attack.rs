//! Auto-attack passive.
//!
//! An actor carrying `AUTO_ATTACK` strikes, at the end of its turn, every
//! hostile that was adjacent when the turn started and is still adjacent now.

use crate::action::AtomicEffect;
use crate::env::{GameEnv, SkillContext};
use crate::state::{ActorId, GameState, SkillId};

/// Hostiles adjacent both in the turn-start snapshot and right now, in
/// snapshot order.
pub fn persistent_targets(state: &GameState, actor_id: ActorId) -> Vec<ActorId> {
    let Some(actor) = state.actor(actor_id).filter(|actor| actor.is_alive()) else {
        return Vec::new();
    };
    let Some(snapshot) = state
        .initiative
        .entry(actor_id)
        .and_then(|entry| entry.turn_start_neighbors.as_ref())
    else {
        return Vec::new();
    };

    snapshot
        .iter()
        .copied()
        .filter(|id| {
            state.actor(*id).is_some_and(|other| {
                other.is_alive()
                    && other.faction.is_hostile_to(actor.faction)
                    && other.position.is_adjacent(actor.position)
            })
        })
        .collect()
}

/// Effects of the auto-attack passive for `actor_id`; empty when the actor
/// lacks the passive or nobody stayed adjacent.
pub fn auto_attack_effects(
    state: &GameState,
    actor_id: ActorId,
    env: &GameEnv<'_>,
) -> Vec<AtomicEffect> {
    let Some(actor) = state.actor(actor_id).filter(|actor| actor.is_alive()) else {
        return Vec::new();
    };
    let id = SkillId::new(SkillId::AUTO_ATTACK);
    let (Some(slot), Some(skill)) = (actor.skill(&id), env.skills.skill(&id)) else {
        return Vec::new();
    };

    persistent_targets(state, actor_id)
        .into_iter()
        .filter_map(|target| state.actor(target))
        .flat_map(|target| {
            let ctx = SkillContext {
                state,
                actor,
                target: Some(target.position),
                upgrades: &slot.upgrades,
                config: env.config,
            };
            skill.execute(&ctx).effects
        })
        .collect()
}
