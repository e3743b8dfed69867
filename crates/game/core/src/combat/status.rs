//! Per-turn status windows.
//!
//! Every status ticks in exactly one window of its owner's turn. Stun is read
//! before the start window ticks, so a one-turn stun always costs one turn.

use crate::action::AtomicEffect;
use crate::config::GameConfig;
use crate::state::{ActorId, GameState, SkillId, StatusEffect, StatusKind, StatusWindow};

/// What the start-of-turn window decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct TurnStart {
    pub stunned: bool,
}

/// Runs the start-of-turn window for `actor_id`.
pub fn start_of_turn(state: &mut GameState, actor_id: ActorId) -> TurnStart {
    let Some(mut actor) = state.actor(actor_id).cloned() else {
        return TurnStart::default();
    };
    let stunned = actor.has_status(StatusKind::Stunned);

    if actor.has_status(StatusKind::Fortified) {
        actor.temporary_armor += 1;
    }
    tick_window(&mut actor.statuses, StatusWindow::StartOfTurn);
    state.replace_actor(actor);

    TurnStart { stunned }
}

/// Damage owed at the end of the turn: poison, and fire under the actor.
pub fn end_of_turn_effects(
    state: &GameState,
    actor_id: ActorId,
    config: &GameConfig,
) -> Vec<AtomicEffect> {
    let Some(actor) = state.actor(actor_id).filter(|actor| actor.is_alive()) else {
        return Vec::new();
    };
    let mut effects = Vec::new();
    if actor.has_status(StatusKind::Poisoned) {
        effects.push(AtomicEffect::damage(actor_id, 1, "poison"));
    }
    if state.tiles.is_on_fire(actor.position) {
        effects.push(AtomicEffect::damage(actor_id, config.fire_damage, "fire"));
    }
    effects
}

/// Ticks end-window statuses, cooldowns and stealth. The skill used this
/// turn keeps the cooldown it was just given.
pub fn tick_end_of_turn(state: &mut GameState, actor_id: ActorId, used_skill: Option<&SkillId>) {
    let Some(mut actor) = state.actor(actor_id).cloned() else {
        return;
    };

    tick_window(&mut actor.statuses, StatusWindow::EndOfTurn);
    for slot in &mut actor.skills {
        if Some(&slot.id) != used_skill {
            slot.current_cooldown = slot.current_cooldown.saturating_sub(1);
        }
    }
    actor.stealth_counter = actor.stealth_counter.saturating_sub(1);

    state.replace_actor(actor);
}

/// Burns down timed tile effects by one turn.
pub fn tick_tiles(state: &mut GameState) {
    for (_, tile) in state.tiles.tiles_mut() {
        for effect in &mut tile.effects {
            effect.duration = effect.duration.saturating_sub(1);
        }
        tile.effects.retain(|effect| effect.duration > 0);
    }
}

fn tick_window(statuses: &mut Vec<StatusEffect>, window: StatusWindow) {
    for status in statuses.iter_mut() {
        if status.kind.window() == window {
            status.duration = status.duration.saturating_sub(1);
        }
    }
    statuses.retain(|status| status.kind.window() != window || status.duration > 0);
}
