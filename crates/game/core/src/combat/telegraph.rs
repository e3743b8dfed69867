//! Telegraphed skills.
//!
//! A telegraph declared on one turn resolves at the start of the owner's
//! next turn: it fires when its target cell is still a legal target and a
//! hostile stands in its footprint, and is dropped otherwise. Either way the
//! telegraph is cleared.

use std::collections::BTreeSet;

use crate::action::{AtomicEffect, EffectTarget, Intent, TacticalExecutor, TacticalResult};
use crate::diagnostics::Diagnostic;
use crate::env::GameEnv;
use crate::state::{ActorId, GameState, Point};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TelegraphResolution {
    /// Nothing was declared.
    None,
    /// The skill fired; the result already carries the `ClearTelegraph`.
    Fired(TacticalResult),
    /// The skill fizzled; the telegraph is cleared silently.
    Dropped(Vec<AtomicEffect>),
}

impl TelegraphResolution {
    pub fn into_effects(self) -> Vec<AtomicEffect> {
        match self {
            Self::None => Vec::new(),
            Self::Fired(result) => result.effects,
            Self::Dropped(effects) => effects,
        }
    }
}

pub fn resolve_telegraph(
    state: &GameState,
    actor_id: ActorId,
    env: &GameEnv<'_>,
) -> TelegraphResolution {
    let Some(actor) = state.actor(actor_id).filter(|actor| actor.is_alive()) else {
        return TelegraphResolution::None;
    };
    let Some(telegraph) = actor.telegraph.as_ref() else {
        return TelegraphResolution::None;
    };
    let clear = AtomicEffect::ClearTelegraph { actor: actor_id };

    let Some(skill) = env.skills.skill(&telegraph.skill_id) else {
        env.report(
            Diagnostic::warn(
                "telegraph.unknown_skill",
                format!("telegraphed skill {} is not registered", telegraph.skill_id),
            )
            .with_actor(actor_id)
            .at_turn(state.turn_number),
        );
        return TelegraphResolution::Dropped(vec![clear]);
    };

    let still_legal = skill
        .valid_targets(state, actor.position)
        .contains(&telegraph.target);
    let anyone_inside = skill
        .footprint(state, actor.position, telegraph.target)
        .into_iter()
        .filter_map(|cell| state.occupant_at(cell))
        .filter_map(|id| state.actor(id))
        .any(|other| other.is_alive() && other.faction.is_hostile_to(actor.faction));
    if !still_legal || !anyone_inside {
        return TelegraphResolution::Dropped(vec![clear]);
    }

    let intent = Intent::new(actor_id, telegraph.skill_id.as_str())
        .at(telegraph.target)
        .with_reason("TELEGRAPH");
    let mut result = TacticalExecutor::new(*env).execute(&intent, state);
    if !result.consumes_turn {
        return TelegraphResolution::Dropped(vec![clear]);
    }
    result.effects.insert(0, clear);
    TelegraphResolution::Fired(result)
}

/// Cells that the pending telegraphs of living enemies would damage if they
/// fired now. Used by the UI and by the heuristic strategy's caution.
pub fn danger_tiles(state: &GameState, env: &GameEnv<'_>) -> BTreeSet<Point> {
    let executor = TacticalExecutor::new(*env);
    let mut cells = BTreeSet::new();

    for enemy in state.enemies.iter().filter(|enemy| enemy.is_alive()) {
        let Some(telegraph) = enemy.telegraph.as_ref() else {
            continue;
        };
        let intent = Intent::new(enemy.id, telegraph.skill_id.as_str()).at(telegraph.target);
        let simulation = executor.simulate(&intent, state);
        for effect in &simulation.result.effects {
            match effect {
                AtomicEffect::Damage {
                    target: EffectTarget::Cell(cell),
                    ..
                } => {
                    cells.insert(*cell);
                }
                AtomicEffect::Damage {
                    target: EffectTarget::Actor(id),
                    ..
                } => {
                    if let Some(victim) = state.actor(*id) {
                        cells.insert(victim.position);
                    }
                }
                _ => {}
            }
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Telegraph;
    use crate::test_support::*;

    fn telegraphed_duel() -> (GameState, ActorId) {
        let mut state = duel();
        let brute = state.enemies[0].id;
        state.enemies[0].telegraph = Some(Telegraph {
            skill_id: "HEAVY_SLAM".into(),
            target: Point::new(1, 1),
        });
        (state, brute)
    }

    #[test]
    fn fires_when_player_stays_in_footprint() {
        let fixture = Fixture::new();
        let (state, brute) = telegraphed_duel();

        let TelegraphResolution::Fired(result) = resolve_telegraph(&state, brute, &fixture.env())
        else {
            panic!("telegraph should fire");
        };
        assert_eq!(result.effects[0], AtomicEffect::ClearTelegraph { actor: brute });
        assert!(
            result
                .effects
                .contains(&AtomicEffect::damage_cell(Point::new(1, 1), 3, "slam"))
        );
    }

    #[test]
    fn dropped_silently_when_player_stepped_out() {
        let fixture = Fixture::new();
        let (mut state, brute) = telegraphed_duel();
        state.player.position = Point::new(1, 2);
        state.rebuild_occupancy();

        let resolution = resolve_telegraph(&state, brute, &fixture.env());
        let TelegraphResolution::Dropped(effects) = resolution else {
            panic!("telegraph should fizzle");
        };
        assert_eq!(effects, vec![AtomicEffect::ClearTelegraph { actor: brute }]);
    }

    #[test]
    fn no_telegraph_is_a_no_op() {
        let fixture = Fixture::new();
        let state = duel();
        let brute = state.enemies[0].id;
        assert_eq!(
            resolve_telegraph(&state, brute, &fixture.env()),
            TelegraphResolution::None
        );
    }

    #[test]
    fn danger_tiles_cover_the_pending_slam() {
        let fixture = Fixture::new();
        let (state, _) = telegraphed_duel();
        let before = state.clone();

        let danger = danger_tiles(&state, &fixture.env());
        assert_eq!(danger, BTreeSet::from([Point::new(1, 1)]));
        assert_eq!(state, before);
    }
}
