//! Terrain rules that rewrite effects before they are applied.
//!
//! Each interceptor maps one effect to one or more. The input effect is always
//! kept, in place, ahead of anything the interceptor appends, so unrelated
//! effects are never dropped or reordered. Interceptors read the state as it
//! was before the fold, plus the positions projected by the displacements
//! already emitted in the batch.

use std::collections::BTreeMap;

use crate::action::AtomicEffect;
use crate::config::GameConfig;
use crate::state::{ActorId, GameState, Point};

pub struct InterceptContext<'a> {
    pub state: &'a GameState,
    pub config: &'a GameConfig,
    /// True when this is the last displacement of its target in the batch.
    pub settles: bool,
    /// Occupancy after every displacement emitted so far in this pass.
    pub projected: &'a ProjectedOccupancy,
}

/// Where living actors will stand once the displacements seen so far are
/// applied.
#[derive(Clone, Debug, Default)]
pub struct ProjectedOccupancy {
    positions: BTreeMap<ActorId, Point>,
    cells: BTreeMap<Point, ActorId>,
}

impl ProjectedOccupancy {
    pub fn new(state: &GameState) -> Self {
        let mut projected = Self::default();
        for actor in state.living_actors() {
            projected.place(actor.id, actor.position);
        }
        projected
    }

    pub fn occupant_at(&self, cell: Point) -> Option<ActorId> {
        self.cells.get(&cell).copied()
    }

    /// Follows a displacement; other effects leave the projection alone.
    pub fn track(&mut self, effect: &AtomicEffect) {
        if let AtomicEffect::Displacement { target, to, .. } = effect {
            if self.positions.contains_key(target) {
                self.place(*target, *to);
            }
        }
    }

    fn place(&mut self, id: ActorId, cell: Point) {
        if let Some(old) = self.positions.insert(id, cell) {
            if self.cells.get(&old) == Some(&id) {
                self.cells.remove(&old);
            }
        }
        self.cells.insert(cell, id);
    }
}

pub trait Interceptor {
    fn name(&self) -> &'static str;

    fn intercept(&self, effect: AtomicEffect, ctx: &InterceptContext<'_>) -> Vec<AtomicEffect>;
}

/// Chain order: slides resolve first so the later rules see the final cell.
const CHAIN: [&dyn Interceptor; 4] = [
    &SlipperyInterceptor,
    &VoidInterceptor,
    &HazardInterceptor,
    &TrapInterceptor,
];

/// Runs `effects` through the whole chain.
pub fn intercept(
    state: &GameState,
    effects: Vec<AtomicEffect>,
    config: &GameConfig,
) -> Vec<AtomicEffect> {
    CHAIN.iter().fold(effects, |effects, interceptor| {
        let settles = settling_moves(&effects);
        let mut projected = ProjectedOccupancy::new(state);
        let mut out = Vec::with_capacity(effects.len());
        for (effect, settles) in effects.into_iter().zip(settles) {
            let ctx = InterceptContext {
                state,
                config,
                settles,
                projected: &projected,
            };
            let produced = interceptor.intercept(effect, &ctx);
            for effect in &produced {
                projected.track(effect);
            }
            out.extend(produced);
        }
        out
    })
}

fn settling_moves(effects: &[AtomicEffect]) -> Vec<bool> {
    effects
        .iter()
        .enumerate()
        .map(|(index, effect)| match effect {
            AtomicEffect::Displacement { target, .. } => !effects[index + 1..].iter().any(
                |later| matches!(later, AtomicEffect::Displacement { target: t, .. } if t == target),
            ),
            _ => false,
        })
        .collect()
}

fn landing(effect: &AtomicEffect) -> Option<(ActorId, Point, Point)> {
    match effect {
        AtomicEffect::Displacement {
            target, from, to, ..
        } => Some((*target, *from, *to)),
        _ => None,
    }
}

/// Keeps a unit sliding while it stands on a slippery tile, one cell at a
/// time, until the next cell is blocked, occupied or out of bounds, or the
/// slide reaches `max_slide_length`.
pub struct SlipperyInterceptor;

impl Interceptor for SlipperyInterceptor {
    fn name(&self) -> &'static str {
        "slippery"
    }

    fn intercept(&self, effect: AtomicEffect, ctx: &InterceptContext<'_>) -> Vec<AtomicEffect> {
        let Some((target, from, to)) = landing(&effect) else {
            return vec![effect];
        };
        let tiles = &ctx.state.tiles;
        if !ctx.settles || !tiles.is_slippery(to) {
            return vec![effect];
        }
        let Some(direction) = from.direction_to(to) else {
            return vec![effect];
        };

        let mut out = vec![effect];
        let mut cell = to;
        for _ in 0..ctx.config.max_slide_length {
            if !tiles.is_slippery(cell) {
                break;
            }
            let next = cell.neighbor(direction);
            let taken = ctx
                .projected
                .occupant_at(next)
                .is_some_and(|occupant| occupant != target);
            if tiles.is_impassable(next) || taken {
                break;
            }
            out.push(AtomicEffect::Displacement {
                target,
                from: cell,
                to: next,
                forced: true,
            });
            cell = next;
        }
        out
    }
}

/// Landing on void costs a fixed amount of hp.
pub struct VoidInterceptor;

impl Interceptor for VoidInterceptor {
    fn name(&self) -> &'static str {
        "void"
    }

    fn intercept(&self, effect: AtomicEffect, ctx: &InterceptContext<'_>) -> Vec<AtomicEffect> {
        let Some((target, _, to)) = landing(&effect) else {
            return vec![effect];
        };
        if !ctx.state.tiles.is_void(to) {
            return vec![effect];
        }
        let name = ctx
            .state
            .actor(target)
            .map_or("Something", |actor| actor.archetype.as_str());
        vec![
            effect,
            AtomicEffect::damage(target, ctx.config.void_damage, "void"),
            AtomicEffect::message(format!("{name} falls into the void")),
        ]
    }
}

/// A unit moved onto lava sinks.
pub struct HazardInterceptor;

impl Interceptor for HazardInterceptor {
    fn name(&self) -> &'static str {
        "hazard"
    }

    fn intercept(&self, effect: AtomicEffect, ctx: &InterceptContext<'_>) -> Vec<AtomicEffect> {
        let Some((target, _, to)) = landing(&effect) else {
            return vec![effect];
        };
        if !ctx.state.tiles.is_lava(to) {
            return vec![effect];
        }
        vec![
            effect,
            AtomicEffect::LavaSink {
                target,
                position: to,
            },
        ]
    }
}

/// Armed traps spring on hostile units that land on them.
pub struct TrapInterceptor;

impl Interceptor for TrapInterceptor {
    fn name(&self) -> &'static str {
        "trap"
    }

    fn intercept(&self, effect: AtomicEffect, ctx: &InterceptContext<'_>) -> Vec<AtomicEffect> {
        let Some((target, _, to)) = landing(&effect) else {
            return vec![effect];
        };
        let Some(faction) = ctx.state.actor(target).map(|actor| actor.faction) else {
            return vec![effect];
        };
        match ctx.state.trap_at(to) {
            Some(trap) if trap.springs_on(faction) => vec![
                effect,
                AtomicEffect::damage(target, trap.damage, "trap"),
                AtomicEffect::TriggerTrap { position: to },
            ],
            _ => vec![effect],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BaseTile, Faction, Trap};
    use crate::test_support::*;

    fn displacements(effects: &[AtomicEffect]) -> Vec<Point> {
        effects
            .iter()
            .filter_map(|effect| landing(effect).map(|(_, _, to)| to))
            .collect()
    }

    fn ice_row(state: &mut GameState, cells: &[(i32, i32)]) {
        for &(q, r) in cells {
            state.tiles.set(Point::new(q, r), BaseTile::Ice);
        }
    }

    #[test]
    fn slide_continues_until_blocked_cell() {
        let mut state = open_field();
        ice_row(&mut state, &[(2, 1), (3, 1), (4, 1)]);
        state.tiles.set(Point::new(5, 1), BaseTile::Wall);

        let effects = intercept(
            &state,
            vec![AtomicEffect::step(
                ActorId::PLAYER,
                Point::new(1, 1),
                Point::new(2, 1),
            )],
            &GameConfig::default(),
        );

        assert_eq!(
            displacements(&effects),
            vec![Point::new(2, 1), Point::new(3, 1), Point::new(4, 1)]
        );
    }

    #[test]
    fn slide_stops_before_occupied_cell() {
        let mut state = open_field();
        ice_row(&mut state, &[(2, 1), (3, 1)]);
        state.spawn_actor(footman(Point::new(4, 1))).unwrap();

        let effects = intercept(
            &state,
            vec![AtomicEffect::step(
                ActorId::PLAYER,
                Point::new(1, 1),
                Point::new(2, 1),
            )],
            &GameConfig::default(),
        );
        assert_eq!(
            displacements(&effects),
            vec![Point::new(2, 1), Point::new(3, 1)]
        );
    }

    #[test]
    fn slide_is_bounded_by_max_length() {
        let mut state = open_field();
        ice_row(&mut state, &[(2, 1), (3, 1), (4, 1), (5, 1), (6, 1)]);
        let config = GameConfig {
            max_slide_length: 2,
            ..GameConfig::default()
        };

        let effects = intercept(
            &state,
            vec![AtomicEffect::step(
                ActorId::PLAYER,
                Point::new(1, 1),
                Point::new(2, 1),
            )],
            &config,
        );
        assert_eq!(displacements(&effects).len(), 3);
    }

    #[test]
    fn only_final_move_of_a_target_slides() {
        let mut state = open_field();
        ice_row(&mut state, &[(2, 1)]);
        let effects = intercept(
            &state,
            vec![
                AtomicEffect::step(ActorId::PLAYER, Point::new(1, 1), Point::new(2, 1)),
                AtomicEffect::step(ActorId::PLAYER, Point::new(2, 1), Point::new(2, 2)),
            ],
            &GameConfig::default(),
        );
        assert_eq!(effects.len(), 2);
    }

    #[test]
    fn slide_sees_moves_made_earlier_in_the_batch() {
        let mut state = open_field();
        let back = state.spawn_actor(footman(Point::new(1, 5))).unwrap();
        let front = state.spawn_actor(footman(Point::new(2, 5))).unwrap();
        ice_row(&mut state, &[(2, 5)]);

        // Front unit first, as a kinetic chain emits them.
        let effects = intercept(
            &state,
            vec![
                AtomicEffect::step(front, Point::new(2, 5), Point::new(3, 5)),
                AtomicEffect::step(back, Point::new(1, 5), Point::new(2, 5)),
            ],
            &GameConfig::default(),
        );
        assert_eq!(
            displacements(&effects),
            vec![Point::new(3, 5), Point::new(2, 5)]
        );
    }

    #[test]
    fn slide_follows_a_unit_that_already_left() {
        let mut state = open_field();
        let blocker = state.spawn_actor(footman(Point::new(3, 1))).unwrap();
        ice_row(&mut state, &[(2, 1), (3, 1)]);

        let effects = intercept(
            &state,
            vec![
                AtomicEffect::step(blocker, Point::new(3, 1), Point::new(3, 2)),
                AtomicEffect::step(ActorId::PLAYER, Point::new(1, 1), Point::new(2, 1)),
            ],
            &GameConfig::default(),
        );
        assert_eq!(
            displacements(&effects),
            vec![
                Point::new(3, 2),
                Point::new(2, 1),
                Point::new(3, 1),
                Point::new(4, 1),
            ]
        );
    }

    #[test]
    fn slide_onto_lava_sinks() {
        let mut state = open_field();
        ice_row(&mut state, &[(2, 1)]);
        state.tiles.set(Point::new(3, 1), BaseTile::Lava);

        let effects = intercept(
            &state,
            vec![AtomicEffect::step(
                ActorId::PLAYER,
                Point::new(1, 1),
                Point::new(2, 1),
            )],
            &GameConfig::default(),
        );
        assert_eq!(
            effects.last(),
            Some(&AtomicEffect::LavaSink {
                target: ActorId::PLAYER,
                position: Point::new(3, 1),
            })
        );
    }

    #[test]
    fn unrelated_effects_pass_through_in_order() {
        let mut state = open_field();
        state.tiles.set(Point::new(2, 1), BaseTile::Void);
        let effects = vec![
            AtomicEffect::message("before"),
            AtomicEffect::step(ActorId::PLAYER, Point::new(1, 1), Point::new(2, 1)),
            AtomicEffect::message("after"),
        ];

        let out = intercept(&state, effects, &GameConfig::default());
        let tags: Vec<&str> = out.iter().map(AtomicEffect::tag).collect();
        assert_eq!(
            tags,
            vec!["Message", "Displacement", "Damage", "Message", "Message"]
        );
        assert_eq!(out[4], AtomicEffect::message("after"));
    }

    #[test]
    fn hostile_trap_springs_friendly_trap_does_not() {
        let mut state = open_field();
        let footman_id = state.spawn_actor(footman(Point::new(3, 3))).unwrap();
        state.traps.push(Trap {
            position: Point::new(3, 4),
            owner: ActorId::PLAYER,
            faction: Faction::Player,
            damage: 2,
            armed: true,
        });

        let enemy_step = intercept(
            &state,
            vec![AtomicEffect::step(footman_id, Point::new(3, 3), Point::new(3, 4))],
            &GameConfig::default(),
        );
        assert_eq!(
            enemy_step[1..],
            [
                AtomicEffect::damage(footman_id, 2, "trap"),
                AtomicEffect::TriggerTrap {
                    position: Point::new(3, 4)
                },
            ]
        );

        let player_step = intercept(
            &state,
            vec![AtomicEffect::step(
                ActorId::PLAYER,
                Point::new(2, 4),
                Point::new(3, 4),
            )],
            &GameConfig::default(),
        );
        assert_eq!(player_step.len(), 1);
    }
}
