//! Kinetic pulse: momentum transfer along a hex ray.
//!
//! The pulse starts with the unit standing on `origin` and pushes it in
//! `direction`. Units met along the way join the chain; every step moves the
//! whole chain one cell and costs momentum equal to the chain's total mass.
//! Walls, the map edge and immovable units stop the chain with an `Impact`
//! carrying the remaining momentum; lava stops it with a `LavaSink` for the
//! front unit.

use crate::action::AtomicEffect;
use crate::state::{ActorId, GameState, HexDirection, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KineticPulse {
    pub origin: Point,
    pub direction: HexDirection,
    pub momentum: u32,
}

impl KineticPulse {
    pub fn new(origin: Point, direction: HexDirection, momentum: u32) -> Self {
        Self {
            origin,
            direction,
            momentum,
        }
    }
}

struct Link {
    id: ActorId,
    position: Point,
    mass: u32,
}

enum Ahead {
    Blocked,
    Lava,
    Unit(Link),
    Free,
}

/// Produces the ordered Displacement / Impact / LavaSink effects of a pulse.
/// An empty origin, or an immovable unit on it, yields no effects.
pub fn process_kinetic_pulse(pulse: KineticPulse, state: &GameState) -> Vec<AtomicEffect> {
    let Some(first) = state
        .occupant_at(pulse.origin)
        .and_then(|id| link(state, id))
    else {
        return Vec::new();
    };

    // Back of the chain first, front last.
    let mut chain = vec![first];
    let mut momentum = pulse.momentum;
    let mut effects = Vec::new();

    loop {
        let mass: u32 = chain.iter().map(|link| link.mass).sum();
        if momentum < mass {
            break;
        }
        let Some((front, position)) = chain.last().map(|link| (link.id, link.position)) else {
            break;
        };
        let ahead = position.neighbor(pulse.direction);

        match look_ahead(state, ahead) {
            Ahead::Blocked => {
                effects.push(AtomicEffect::Impact {
                    target: front,
                    damage: momentum,
                    direction: pulse.direction,
                });
                break;
            }
            Ahead::Lava => {
                effects.push(AtomicEffect::LavaSink {
                    target: front,
                    position: ahead,
                });
                break;
            }
            Ahead::Unit(next) => chain.push(next),
            Ahead::Free => {
                for link in chain.iter_mut().rev() {
                    let to = link.position.neighbor(pulse.direction);
                    effects.push(AtomicEffect::Displacement {
                        target: link.id,
                        from: link.position,
                        to,
                        forced: true,
                    });
                    link.position = to;
                }
                momentum -= mass;
            }
        }
    }

    effects
}

/// Chain entry for a movable unit; `None` for immovable ones.
fn link(state: &GameState, id: ActorId) -> Option<Link> {
    let actor = state.actor(id)?;
    Some(Link {
        id,
        position: actor.position,
        mass: actor.weight.mass()?,
    })
}

fn look_ahead(state: &GameState, cell: Point) -> Ahead {
    if state.tiles.is_impassable(cell) {
        return Ahead::Blocked;
    }
    if let Some(id) = state.occupant_at(cell) {
        return match link(state, id) {
            Some(next) => Ahead::Unit(next),
            None => Ahead::Blocked,
        };
    }
    if state.tiles.is_lava(cell) {
        return Ahead::Lava;
    }
    Ahead::Free
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BaseTile, WeightClass};
    use crate::test_support::*;

    fn steps(effects: &[AtomicEffect]) -> Vec<(ActorId, Point)> {
        effects
            .iter()
            .filter_map(|effect| match effect {
                AtomicEffect::Displacement { target, to, .. } => Some((*target, *to)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn lone_unit_moves_once_per_momentum() {
        let mut state = open_field();
        let id = state.spawn_actor(footman(Point::new(2, 4))).unwrap();

        let effects = process_kinetic_pulse(
            KineticPulse::new(Point::new(2, 4), HexDirection::East, 4),
            &state,
        );

        assert_eq!(effects.len(), 4);
        assert_eq!(
            steps(&effects),
            (3..=6).map(|q| (id, Point::new(q, 4))).collect::<Vec<_>>()
        );
    }

    #[test]
    fn chain_advances_momentum_over_length() {
        let mut state = open_field();
        for q in 1..=4 {
            state.spawn_actor(footman(Point::new(q, 5))).unwrap();
        }

        let effects = process_kinetic_pulse(
            KineticPulse::new(Point::new(1, 5), HexDirection::East, 4),
            &state,
        );

        // Four units, momentum four: every unit advances exactly one cell,
        // front first.
        let moved = steps(&effects);
        assert_eq!(moved.len(), 4);
        assert_eq!(moved[0].1, Point::new(5, 5));
        assert_eq!(moved[3].1, Point::new(2, 5));
    }

    #[test]
    fn chain_of_two_with_five_momentum_moves_twice() {
        let mut state = open_field();
        state.spawn_actor(footman(Point::new(1, 6))).unwrap();
        state.spawn_actor(footman(Point::new(2, 6))).unwrap();

        let effects = process_kinetic_pulse(
            KineticPulse::new(Point::new(1, 6), HexDirection::East, 5),
            &state,
        );
        assert_eq!(steps(&effects).len(), 4);
        assert!(effects.iter().all(|e| matches!(e, AtomicEffect::Displacement { .. })));
    }

    #[test]
    fn lava_stops_the_front_unit_before_the_cell() {
        let mut state = open_field();
        let id = state.spawn_actor(footman(Point::new(2, 4))).unwrap();
        state.tiles.set(Point::new(4, 4), BaseTile::Lava);

        let effects = process_kinetic_pulse(
            KineticPulse::new(Point::new(2, 4), HexDirection::East, 5),
            &state,
        );

        assert_eq!(steps(&effects), vec![(id, Point::new(3, 4))]);
        assert_eq!(
            effects.last(),
            Some(&AtomicEffect::LavaSink {
                target: id,
                position: Point::new(4, 4),
            })
        );
    }

    #[test]
    fn wall_impact_carries_remaining_momentum() {
        let mut state = open_field();
        let id = state.spawn_actor(footman(Point::new(2, 4))).unwrap();
        state.tiles.set(Point::new(4, 4), BaseTile::Wall);

        let effects = process_kinetic_pulse(
            KineticPulse::new(Point::new(2, 4), HexDirection::East, 10),
            &state,
        );

        assert_eq!(
            effects,
            vec![
                AtomicEffect::Displacement {
                    target: id,
                    from: Point::new(2, 4),
                    to: Point::new(3, 4),
                    forced: true,
                },
                AtomicEffect::Impact {
                    target: id,
                    damage: 9,
                    direction: HexDirection::East,
                },
            ]
        );
    }

    #[test]
    fn map_edge_counts_as_wall() {
        let mut state = open_field();
        let id = state.spawn_actor(footman(Point::new(7, 2))).unwrap();

        let effects = process_kinetic_pulse(
            KineticPulse::new(Point::new(7, 2), HexDirection::East, 3),
            &state,
        );
        assert_eq!(steps(&effects), vec![(id, Point::new(8, 2))]);
        assert!(matches!(
            effects.last(),
            Some(AtomicEffect::Impact { damage: 2, .. })
        ));
    }

    #[test]
    fn anchored_unit_behaves_like_a_wall() {
        let mut state = open_field();
        let pushed = state.spawn_actor(footman(Point::new(2, 4))).unwrap();
        state
            .spawn_actor(footman(Point::new(3, 4)).with_weight(WeightClass::Anchored))
            .unwrap();

        let effects = process_kinetic_pulse(
            KineticPulse::new(Point::new(2, 4), HexDirection::East, 3),
            &state,
        );
        assert_eq!(
            effects,
            vec![AtomicEffect::Impact {
                target: pushed,
                damage: 3,
                direction: HexDirection::East,
            }]
        );
    }

    #[test]
    fn heavy_unit_costs_double() {
        let mut state = open_field();
        state
            .spawn_actor(footman(Point::new(2, 4)).with_weight(WeightClass::Heavy))
            .unwrap();
        let effects = process_kinetic_pulse(
            KineticPulse::new(Point::new(2, 4), HexDirection::East, 5),
            &state,
        );
        assert_eq!(steps(&effects).len(), 2);
    }

    #[test]
    fn empty_origin_yields_nothing() {
        let state = open_field();
        let pulse = KineticPulse::new(Point::new(5, 5), HexDirection::West, 9);
        assert!(process_kinetic_pulse(pulse, &state).is_empty());
    }

    #[test]
    fn pulse_is_deterministic() {
        let mut state = open_field();
        state.spawn_actor(footman(Point::new(2, 2))).unwrap();
        state.spawn_actor(footman(Point::new(3, 2))).unwrap();
        state.tiles.set(Point::new(6, 2), BaseTile::Wall);
        let pulse = KineticPulse::new(Point::new(2, 2), HexDirection::East, 7);
        assert_eq!(
            process_kinetic_pulse(pulse, &state),
            process_kinetic_pulse(pulse, &state)
        );
    }
}
