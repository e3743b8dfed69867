use hexbound_core::state::{GameState, HexDirection, ItemKind, Point, VisualEvent};
use hexbound_core::{AtomicEffect, SkillBase, SkillContext, SkillDefinition, SkillOutcome};

use super::sight_line;

/// Cells reachable by a projectile from `origin` in any direction.
fn sight_cells(state: &GameState, origin: Point, range: u32) -> Vec<Point> {
    HexDirection::ALL
        .into_iter()
        .flat_map(|direction| sight_line(state, origin, direction, range))
        .collect()
}

/// Resolves a straight shot: the cells it crosses on the way to `target`.
/// `None` when the target is off-axis, out of range or behind a wall. A unit
/// in the way ends the path early.
fn flight_path(state: &GameState, origin: Point, target: Point, range: u32) -> Option<Vec<Point>> {
    let direction = origin.direction_to(target)?;
    let distance = origin.distance(target);
    if distance > range {
        return None;
    }
    let path = sight_line(state, origin, direction, distance);
    match path.last() {
        Some(last) if *last == target || state.is_occupied(*last) => Some(path),
        _ => None,
    }
}

/// The first unit on the path takes the hit; an empty path lands on the target.
fn first_hit(state: &GameState, path: &[Point]) -> Option<Point> {
    path.iter()
        .copied()
        .find(|cell| state.is_occupied(*cell))
        .or_else(|| path.last().copied())
}

/// Throws the spear in a straight line. It drops on the cell it stops at and
/// must be picked up before the next throw.
///
/// Upgrades: `LONG_THROW` (+1 range), `PIERCE` (+1 damage).
pub struct SpearThrow {
    base: SkillBase,
}

impl SpearThrow {
    pub fn new(base: SkillBase) -> Self {
        Self { base }
    }
}

impl SkillDefinition for SpearThrow {
    fn base(&self) -> &SkillBase {
        &self.base
    }

    fn execute(&self, ctx: &SkillContext<'_>) -> SkillOutcome {
        if ctx.actor.is_player() && !ctx.state.has_spear {
            return SkillOutcome::declined("The spear is not in hand");
        }
        let range = self.base.range + u32::from(ctx.has_upgrade("LONG_THROW"));
        let Some(path) = ctx
            .target
            .and_then(|target| flight_path(ctx.state, ctx.actor.position, target, range))
        else {
            return SkillOutcome::declined("No clear throw");
        };
        let Some(landing) = first_hit(ctx.state, &path) else {
            return SkillOutcome::declined("No clear throw");
        };

        let mut effects = Vec::new();
        if ctx.state.is_occupied(landing) {
            let damage = self.base.damage + u32::from(ctx.has_upgrade("PIERCE"));
            effects.push(AtomicEffect::damage_cell(landing, damage, "spear"));
        }
        effects.push(AtomicEffect::SpawnItem {
            kind: ItemKind::Spear,
            position: landing,
        });
        SkillOutcome::new(effects)
    }

    fn valid_targets(&self, state: &GameState, origin: Point) -> Vec<Point> {
        sight_cells(state, origin, self.base.range)
    }
}

/// Picks the spear up from the actor's own cell.
pub struct SpearPickup {
    base: SkillBase,
}

impl SpearPickup {
    pub fn new(base: SkillBase) -> Self {
        Self { base }
    }
}

impl SkillDefinition for SpearPickup {
    fn base(&self) -> &SkillBase {
        &self.base
    }

    fn execute(&self, ctx: &SkillContext<'_>) -> SkillOutcome {
        let position = ctx.actor.position;
        match ctx.state.item_at(position) {
            Some(item) if item.kind == ItemKind::Spear => {
                SkillOutcome::new(vec![AtomicEffect::PickupItem {
                    kind: ItemKind::Spear,
                    position,
                }])
            }
            _ => SkillOutcome::declined("No spear here"),
        }
    }
}

/// Arrow along a hex axis; the first unit in the way takes it. Archers
/// telegraph the shot, so the footprint is the whole flight path.
pub struct ArcherShot {
    base: SkillBase,
}

impl ArcherShot {
    pub fn new(base: SkillBase) -> Self {
        Self { base }
    }
}

impl SkillDefinition for ArcherShot {
    fn base(&self) -> &SkillBase {
        &self.base
    }

    fn execute(&self, ctx: &SkillContext<'_>) -> SkillOutcome {
        let Some(path) = ctx
            .target
            .and_then(|target| flight_path(ctx.state, ctx.actor.position, target, self.base.range))
        else {
            return SkillOutcome::declined("No line of fire");
        };
        let Some(hit) = first_hit(ctx.state, &path) else {
            return SkillOutcome::declined("No line of fire");
        };
        SkillOutcome::new(vec![AtomicEffect::damage_cell(hit, self.base.damage, "arrow")])
    }

    fn valid_targets(&self, state: &GameState, origin: Point) -> Vec<Point> {
        sight_cells(state, origin, self.base.range)
    }

    fn footprint(&self, _state: &GameState, origin: Point, target: Point) -> Vec<Point> {
        origin.line_to(target).unwrap_or_else(|| vec![target])
    }
}

/// Sets a cell ablaze.
///
/// Upgrades: `INFERNO` (the six surrounding cells catch fire too).
pub struct Fireball {
    base: SkillBase,
}

impl Fireball {
    const BURN_TURNS: u32 = 3;
    const SPREAD_TURNS: u32 = 2;

    pub fn new(base: SkillBase) -> Self {
        Self { base }
    }

    fn in_reach(&self, state: &GameState, origin: Point, cell: Point) -> bool {
        (1..=self.base.range).contains(&origin.distance(cell)) && !state.tiles.is_impassable(cell)
    }
}

impl SkillDefinition for Fireball {
    fn base(&self) -> &SkillBase {
        &self.base
    }

    fn execute(&self, ctx: &SkillContext<'_>) -> SkillOutcome {
        let Some(target) = ctx
            .target
            .filter(|cell| self.in_reach(ctx.state, ctx.actor.position, *cell))
        else {
            return SkillOutcome::declined("Out of range");
        };

        let mut effects = vec![
            AtomicEffect::damage_cell(target, self.base.damage, "fire"),
            AtomicEffect::PlaceFire {
                position: target,
                duration: Self::BURN_TURNS,
            },
        ];
        if ctx.has_upgrade("INFERNO") {
            effects.extend(target.neighbors().into_iter().map(|cell| AtomicEffect::PlaceFire {
                position: cell,
                duration: Self::SPREAD_TURNS,
            }));
        }
        effects.push(AtomicEffect::Juice {
            event: VisualEvent::Flash { position: target },
        });
        SkillOutcome::new(effects)
    }

    fn valid_targets(&self, state: &GameState, origin: Point) -> Vec<Point> {
        state
            .tiles
            .bounds
            .cells()
            .filter(|cell| self.in_reach(state, origin, *cell))
            .collect()
    }
}

#[cfg(all(test, feature = "loaders"))]
mod tests {
    use hexbound_core::state::{BaseTile, WorldItem};

    use super::*;
    use crate::skills::testing::*;
    use crate::skills::{ARCHER_SHOT, FIREBALL, SPEAR_PICKUP, SPEAR_THROW};

    #[test]
    fn spear_hits_the_first_unit_and_drops_there() {
        let mut state = board();
        enemy(&mut state, Point::new(6, 4));
        enemy(&mut state, Point::new(7, 4));

        let outcome = cast(&state, SPEAR_THROW, Some(Point::new(7, 4)), &["PIERCE"]);
        // The near unit shields the far one.
        assert_eq!(outcome.effects, vec![
            AtomicEffect::damage_cell(Point::new(6, 4), 3, "spear"),
            AtomicEffect::SpawnItem {
                kind: ItemKind::Spear,
                position: Point::new(6, 4),
            },
        ]);
    }

    #[test]
    fn spear_in_the_dirt_cannot_be_thrown() {
        let mut state = board();
        state.has_spear = false;
        assert!(!cast(&state, SPEAR_THROW, Some(Point::new(6, 4)), &[]).consumes_turn);
    }

    #[test]
    fn empty_throw_just_drops_the_spear() {
        let state = board();
        let outcome = cast(&state, SPEAR_THROW, Some(Point::new(4, 2)), &[]);
        assert_eq!(outcome.effects, vec![AtomicEffect::SpawnItem {
            kind: ItemKind::Spear,
            position: Point::new(4, 2),
        }]);
    }

    #[test]
    fn walls_block_the_throw() {
        let mut state = board();
        state.tiles.set(Point::new(5, 4), BaseTile::Wall);
        assert!(!cast(&state, SPEAR_THROW, Some(Point::new(6, 4)), &[]).consumes_turn);
        assert!(!targets(&state, SPEAR_THROW, Point::new(4, 4)).contains(&Point::new(6, 4)));
    }

    #[test]
    fn pickup_needs_the_spear_underfoot() {
        let mut state = board();
        assert!(!cast(&state, SPEAR_PICKUP, None, &[]).consumes_turn);

        state.items.push(WorldItem {
            kind: ItemKind::Spear,
            position: Point::new(4, 4),
        });
        assert_eq!(
            cast(&state, SPEAR_PICKUP, None, &[]).effects,
            vec![AtomicEffect::PickupItem {
                kind: ItemKind::Spear,
                position: Point::new(4, 4),
            }]
        );
    }

    #[test]
    fn archer_footprint_covers_the_flight_path() {
        let state = board();
        let pack = pack();
        let shot = pack.skill(ARCHER_SHOT).expect("archer shot");
        assert_eq!(
            shot.footprint(&state, Point::new(4, 1), Point::new(4, 4)),
            vec![Point::new(4, 2), Point::new(4, 3), Point::new(4, 4)]
        );
        assert!(shot.valid_targets(&state, Point::new(4, 1)).contains(&Point::new(4, 4)));
    }

    #[test]
    fn inferno_spreads_fire_around_the_target() {
        let state = board();
        let outcome = cast(&state, FIREBALL, Some(Point::new(4, 2)), &["INFERNO"]);
        let fires = outcome
            .effects
            .iter()
            .filter(|effect| matches!(effect, AtomicEffect::PlaceFire { .. }))
            .count();
        assert_eq!(fires, 7);
        assert!(!cast(&state, FIREBALL, Some(Point::new(4, 0)), &[]).consumes_turn);
    }
}
