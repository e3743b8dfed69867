use crate::action::{AtomicEffect, CooldownChange, EffectTarget};
use crate::diagnostics::Diagnostic;
use crate::state::{
    ActorId, Faction, GameState, ItemKind, Point, SimulationEvent, StatusEffect, Telegraph,
    TileEffect, TileEffectKind, Trap, VisualEvent, WorldItem,
};

use super::EffectContext;

/// Applies one effect. Effects naming an actor that is gone (dead earlier in
/// the same fold, or never present) are skipped.
pub fn apply_atomic_effect(
    mut state: GameState,
    effect: AtomicEffect,
    ctx: &EffectContext<'_>,
) -> GameState {
    match effect {
        AtomicEffect::Displacement {
            target,
            from,
            to,
            forced,
        } => {
            if let Some(mut actor) = living(&state, target) {
                actor.previous_position = Some(actor.position);
                actor.position = to;
                state.replace_actor(actor);
                state.visual_events.push(VisualEvent::MovementTrace {
                    actor: target,
                    from,
                    to,
                    forced,
                });
            }
        }
        AtomicEffect::Damage {
            target,
            amount,
            reason,
        } => {
            let victim = match target {
                EffectTarget::Actor(id) => Some(id),
                EffectTarget::Cell(position) => standing_on(&state, position),
            };
            if let Some(id) = victim {
                deal_damage(&mut state, id, amount, &reason, false);
            }
        }
        AtomicEffect::Heal { target, amount } => {
            if let Some(mut actor) = living(&state, target) {
                let healed = amount.min(actor.max_hp - actor.hp);
                actor.hp += healed;
                state.replace_actor(actor);
                state.simulation_events.push(SimulationEvent::Healed {
                    actor: target,
                    amount: healed,
                });
            }
        }
        AtomicEffect::ApplyStatus {
            target,
            kind,
            duration,
        } => {
            if let Some(mut actor) = living(&state, target) {
                let id = state.next_status_id();
                actor.statuses.push(StatusEffect::new(id, kind, duration));
                state.replace_actor(actor);
                state
                    .simulation_events
                    .push(SimulationEvent::StatusApplied { actor: target, kind });
            }
        }
        AtomicEffect::SpawnItem { kind, position } => {
            state.items.push(WorldItem { kind, position });
            set_item_flag(&mut state, kind, false);
        }
        AtomicEffect::PickupItem { kind, position } => {
            if let Some(index) = state
                .items
                .iter()
                .position(|item| item.kind == kind && item.position == position)
            {
                state.items.remove(index);
                set_item_flag(&mut state, kind, true);
            }
        }
        AtomicEffect::SpawnActor { actor } => {
            if let Err(error) = state.spawn_actor(*actor) {
                ctx.diagnostics.record(
                    Diagnostic::from_error(&error).at_turn(state.turn_number),
                );
            }
        }
        AtomicEffect::ModifyCooldown {
            actor,
            skill_id,
            change,
        } => {
            if let Some(mut owner) = state.actor(actor).cloned() {
                if let Some(slot) = owner.skill_mut(&skill_id) {
                    slot.current_cooldown = match change {
                        CooldownChange::Set(value) => value,
                        CooldownChange::Delta(delta) => {
                            slot.current_cooldown.saturating_add_signed(delta)
                        }
                    };
                    state.replace_actor(owner);
                }
            }
        }
        AtomicEffect::Impact { target, damage, .. } => {
            if let Some(actor) = living(&state, target) {
                state.push_message(format!("{} slams into an obstacle", actor.archetype));
                state
                    .visual_events
                    .push(VisualEvent::Shake { intensity: damage });
                deal_damage(&mut state, target, damage, "impact", false);
            }
        }
        AtomicEffect::LavaSink { target, position } => {
            if let Some(actor) = living(&state, target) {
                state.push_message(format!("{} sinks into the lava", actor.archetype));
                state.visual_events.push(VisualEvent::Flash { position });
                deal_damage(&mut state, target, actor.hp, "lava", true);
            }
        }
        AtomicEffect::Juice { event } => state.visual_events.push(event),
        AtomicEffect::Message { text } => state.push_message(text),
        AtomicEffect::PlaceTrap {
            position,
            owner,
            damage,
        } => {
            let faction = state
                .actor(owner)
                .map_or(Faction::Player, |actor| actor.faction);
            state.traps.retain(|trap| trap.position != position);
            state.traps.push(Trap {
                position,
                owner,
                faction,
                damage,
                armed: true,
            });
        }
        AtomicEffect::TriggerTrap { position } => {
            let before = state.traps.len();
            state.traps.retain(|trap| trap.position != position);
            if state.traps.len() != before {
                state
                    .simulation_events
                    .push(SimulationEvent::TrapTriggered { position });
                state.visual_events.push(VisualEvent::Flash { position });
            }
        }
        AtomicEffect::SetStealth { target, turns } => {
            if let Some(mut actor) = living(&state, target) {
                actor.stealth_counter = turns;
                state.replace_actor(actor);
            }
        }
        AtomicEffect::UpdateCompanion { target, mode } => {
            if let Some(mut actor) = living(&state, target) {
                actor.companion_mode = Some(mode);
                state.replace_actor(actor);
            }
        }
        AtomicEffect::SetTelegraph {
            actor,
            skill_id,
            target,
        } => {
            if let Some(mut owner) = living(&state, actor) {
                owner.telegraph = Some(Telegraph {
                    skill_id: skill_id.clone(),
                    target,
                });
                state.replace_actor(owner);
                state.simulation_events.push(SimulationEvent::Telegraphed {
                    actor,
                    skill_id,
                    target,
                });
            }
        }
        AtomicEffect::ClearTelegraph { actor } => {
            if let Some(mut owner) = state.actor(actor).cloned() {
                owner.telegraph = None;
                state.replace_actor(owner);
            }
        }
        AtomicEffect::PlaceFire { position, duration } => {
            if !state.tiles.is_impassable(position) {
                if let Some(tile) = state.tiles.tile_mut(position) {
                    match tile
                        .effects
                        .iter_mut()
                        .find(|effect| effect.kind == TileEffectKind::Fire)
                    {
                        Some(fire) => fire.duration = fire.duration.max(duration),
                        None => tile.effects.push(TileEffect {
                            kind: TileEffectKind::Fire,
                            duration,
                        }),
                    }
                }
            }
        }
    }
    state
}

fn living(state: &GameState, id: ActorId) -> Option<crate::state::Actor> {
    state.actor(id).filter(|actor| actor.is_alive()).cloned()
}

/// Resolves a cell target against live positions; the occupancy index is
/// only rebuilt after the fold.
fn standing_on(state: &GameState, position: Point) -> Option<ActorId> {
    state
        .living_actors()
        .find(|actor| actor.position == position)
        .map(|actor| actor.id)
}

fn set_item_flag(state: &mut GameState, kind: ItemKind, value: bool) {
    match kind {
        ItemKind::Spear => state.has_spear = value,
        ItemKind::Shield => state.has_shield = value,
    }
}

/// Temporary armor absorbs first unless `pierce` is set; hp clamps at zero.
/// A dead non-player actor leaves the board and the initiative queue.
pub(crate) fn deal_damage(
    state: &mut GameState,
    target: ActorId,
    amount: u32,
    reason: &str,
    pierce: bool,
) {
    let Some(mut actor) = living(state, target) else {
        return;
    };

    let absorbed = if pierce {
        0
    } else {
        amount.min(actor.temporary_armor)
    };
    actor.temporary_armor -= absorbed;
    let dealt = (amount - absorbed).min(actor.hp);
    actor.hp -= dealt;

    let position = actor.position;
    let died = !actor.is_alive();
    let hostile = actor.faction.is_hostile_to(Faction::Player);
    let name = actor.archetype.clone();
    state.replace_actor(actor);

    state.simulation_events.push(SimulationEvent::Damaged {
        actor: target,
        amount: dealt,
        reason: reason.to_owned(),
    });
    state.visual_events.push(VisualEvent::CombatText {
        position,
        text: format!("-{dealt}"),
    });

    if !died {
        return;
    }
    state.simulation_events.push(SimulationEvent::Died { actor: target });
    if target.is_player() {
        return;
    }
    state.remove_actor(target);
    state.dying.push(target);
    if hostile {
        state.kills += 1;
    }
    state.push_message(format!("{name} dies"));
}
