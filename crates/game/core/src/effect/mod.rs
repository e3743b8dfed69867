//! Effect pipeline.
//!
//! Phase one expands the emitted effects through the interceptor chain.
//! Phase two folds the expanded list into state, left to right, through
//! [`apply_atomic_effect`]. The occupancy index is rebuilt once the fold ends.

mod apply;
mod interceptor;

pub use apply::apply_atomic_effect;
pub use interceptor::{
    HazardInterceptor, InterceptContext, Interceptor, ProjectedOccupancy, SlipperyInterceptor,
    TrapInterceptor, VoidInterceptor, intercept,
};

use crate::action::AtomicEffect;
use crate::config::GameConfig;
use crate::diagnostics::DiagnosticsSink;
use crate::env::GameEnv;
use crate::state::GameState;

/// Rule inputs for one pipeline invocation.
#[derive(Clone, Copy)]
pub struct EffectContext<'a> {
    pub config: &'a GameConfig,
    pub diagnostics: &'a dyn DiagnosticsSink,
}

impl<'a> EffectContext<'a> {
    pub fn new(env: &GameEnv<'a>) -> Self {
        Self {
            config: env.config,
            diagnostics: env.diagnostics,
        }
    }
}

/// Resolves `effects` against `state` and returns the resulting state.
pub fn apply_effects(
    state: GameState,
    effects: Vec<AtomicEffect>,
    ctx: &EffectContext<'_>,
) -> GameState {
    if effects.is_empty() {
        return state;
    }
    let expanded = intercept(&state, effects, ctx.config);
    let mut state = expanded
        .into_iter()
        .fold(state, |state, effect| apply_atomic_effect(state, effect, ctx));
    state.rebuild_occupancy();
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::EffectTarget;
    use crate::state::{
        ActorId, BaseTile, ItemKind, Point, SimulationEvent, StatusKind, VisualEvent,
    };
    use crate::test_support::*;

    fn run(state: GameState, effects: Vec<AtomicEffect>) -> GameState {
        let fixture = Fixture::new();
        apply_effects(state, effects, &EffectContext::new(&fixture.env()))
    }

    #[test]
    fn displacement_moves_actor_and_leaves_a_trace() {
        let state = duel();
        let state = run(
            state,
            vec![AtomicEffect::step(
                ActorId::PLAYER,
                Point::new(1, 1),
                Point::new(1, 2),
            )],
        );

        assert_eq!(state.player.position, Point::new(1, 2));
        assert_eq!(state.player.previous_position, Some(Point::new(1, 1)));
        assert_eq!(state.occupant_at(Point::new(1, 2)), Some(ActorId::PLAYER));
        assert!(!state.is_occupied(Point::new(1, 1)));
        assert!(matches!(
            state.visual_events.last(),
            Some(VisualEvent::MovementTrace { forced: false, .. })
        ));
    }

    #[test]
    fn damage_drains_armor_first_and_clamps() {
        let mut state = duel();
        state.player.temporary_armor = 2;
        let state = run(state, vec![AtomicEffect::damage(ActorId::PLAYER, 3, "test")]);
        assert_eq!(state.player.temporary_armor, 0);
        assert_eq!(state.player.hp, 4);

        let state = run(state, vec![AtomicEffect::damage(ActorId::PLAYER, 40, "test")]);
        assert_eq!(state.player.hp, 0);
        // The player is never removed.
        assert!(state.actor(ActorId::PLAYER).is_some());
    }

    #[test]
    fn lethal_damage_removes_enemy_and_records_dying() {
        let state = duel();
        let brute = state.enemies[0].id;
        let state = run(
            state,
            vec![AtomicEffect::damage_cell(Point::new(2, 1), 10, "test")],
        );

        assert!(state.actor(brute).is_none());
        assert!(state.initiative.entry(brute).is_none());
        assert_eq!(state.dying, vec![brute]);
        assert_eq!(state.kills, 1);
        assert!(!state.is_occupied(Point::new(2, 1)));
        assert!(
            state
                .simulation_events
                .contains(&SimulationEvent::Died { actor: brute })
        );
    }

    #[test]
    fn displacement_before_damage_respects_emission_order() {
        let state = duel();
        let brute = state.enemies[0].id;
        // The cell strike lands on whoever stands there after the move.
        let state = run(
            state,
            vec![
                AtomicEffect::step(brute, Point::new(2, 1), Point::new(3, 1)),
                AtomicEffect::step(ActorId::PLAYER, Point::new(1, 1), Point::new(2, 1)),
                AtomicEffect::Damage {
                    target: EffectTarget::Cell(Point::new(2, 1)),
                    amount: 1,
                    reason: "test".into(),
                },
            ],
        );
        assert_eq!(state.player.hp, 4);
        assert_eq!(state.actor(brute).map(|a| a.hp), Some(3));
    }

    #[test]
    fn chain_pushed_onto_ice_keeps_one_unit_per_cell() {
        use crate::physics::{KineticPulse, process_kinetic_pulse};
        use crate::state::HexDirection;

        let mut state = open_field();
        let back = state.spawn_actor(footman(Point::new(1, 5))).unwrap();
        let front = state.spawn_actor(footman(Point::new(2, 5))).unwrap();
        state.tiles.set(Point::new(2, 5), BaseTile::Ice);

        let push = process_kinetic_pulse(
            KineticPulse::new(Point::new(1, 5), HexDirection::East, 2),
            &state,
        );
        let state = run(state, push);

        assert_eq!(state.actor(front).unwrap().position, Point::new(3, 5));
        assert_eq!(state.actor(back).unwrap().position, Point::new(2, 5));
        assert_eq!(state.occupant_at(Point::new(3, 5)), Some(front));
        assert_eq!(state.occupant_at(Point::new(2, 5)), Some(back));
    }

    #[test]
    fn heal_clamps_at_max() {
        let mut state = duel();
        state.player.hp = 2;
        let state = run(
            state,
            vec![AtomicEffect::Heal {
                target: ActorId::PLAYER,
                amount: 10,
            }],
        );
        assert_eq!(state.player.hp, state.player.max_hp);
    }

    #[test]
    fn statuses_get_generated_ids() {
        let state = run(
            duel(),
            vec![
                AtomicEffect::status(ActorId::PLAYER, StatusKind::Poisoned, 2),
                AtomicEffect::status(ActorId::PLAYER, StatusKind::Marked, 1),
            ],
        );
        let ids: Vec<&str> = state.player.statuses.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["status-0", "status-1"]);
    }

    #[test]
    fn spear_flag_follows_spawn_and_pickup() {
        let mut state = duel();
        state.has_spear = true;
        let spot = Point::new(3, 3);

        let state = run(
            state,
            vec![AtomicEffect::SpawnItem {
                kind: ItemKind::Spear,
                position: spot,
            }],
        );
        assert!(!state.has_spear);
        assert_eq!(state.item_at(spot).map(|i| i.kind), Some(ItemKind::Spear));

        let state = run(
            state,
            vec![AtomicEffect::PickupItem {
                kind: ItemKind::Spear,
                position: spot,
            }],
        );
        assert!(state.has_spear);
        assert!(state.item_at(spot).is_none());
    }

    #[test]
    fn cooldown_changes_clamp_at_zero() {
        let mut state = duel();
        state.player.skills[0].current_cooldown = 1;
        let skill_id = state.player.skills[0].id.clone();
        let state = run(
            state,
            vec![AtomicEffect::ModifyCooldown {
                actor: ActorId::PLAYER,
                skill_id: skill_id.clone(),
                change: crate::action::CooldownChange::Delta(-5),
            }],
        );
        assert_eq!(state.player.skill(&skill_id).unwrap().current_cooldown, 0);
    }

    #[test]
    fn void_landing_deals_fixed_damage() {
        let mut state = duel();
        state.tiles.set(Point::new(1, 2), BaseTile::Void);
        state.player.hp = 200;
        state.player.max_hp = 200;
        let state = run(
            state,
            vec![AtomicEffect::step(
                ActorId::PLAYER,
                Point::new(1, 1),
                Point::new(1, 2),
            )],
        );
        assert_eq!(state.player.hp, 200 - GameConfig::DEFAULT_VOID_DAMAGE);
        assert!(state.message_log.lines().any(|l| l.contains("void")));
    }

    #[test]
    fn spawned_actor_gets_fresh_id() {
        let state = duel();
        let newcomer = footman(Point::new(4, 4));
        let state = run(
            state,
            vec![AtomicEffect::SpawnActor {
                actor: Box::new(newcomer),
            }],
        );
        assert_eq!(state.enemies.len(), 2);
        assert_ne!(state.enemies[1].id, state.enemies[0].id);
        assert!(state.is_occupied(Point::new(4, 4)));
    }
}
