use hexbound_core::state::{GameState, Point, VisualEvent};
use hexbound_core::{AtomicEffect, SkillBase, SkillContext, SkillDefinition, SkillOutcome};

use super::is_open;

/// Arms a trap on an adjacent open cell. It springs on the first hostile
/// unit that lands there.
///
/// Upgrades: `BARBED` (+1 damage).
pub struct SetTrap {
    base: SkillBase,
}

impl SetTrap {
    pub fn new(base: SkillBase) -> Self {
        Self { base }
    }
}

impl SkillDefinition for SetTrap {
    fn base(&self) -> &SkillBase {
        &self.base
    }

    fn execute(&self, ctx: &SkillContext<'_>) -> SkillOutcome {
        let Some(position) = ctx
            .target
            .filter(|cell| self.valid_targets(ctx.state, ctx.actor.position).contains(cell))
        else {
            return SkillOutcome::declined("Cannot set a trap there");
        };
        SkillOutcome::new(vec![AtomicEffect::PlaceTrap {
            position,
            owner: ctx.actor.id,
            damage: self.base.damage + u32::from(ctx.has_upgrade("BARBED")),
        }])
    }

    fn valid_targets(&self, state: &GameState, origin: Point) -> Vec<Point> {
        origin
            .neighbors()
            .into_iter()
            .filter(|cell| is_open(state, *cell) && state.trap_at(*cell).is_none())
            .collect()
    }
}

/// Hides the caster. Enemies ignore a stealthed player when picking targets.
///
/// Upgrades: `LINGER` (one extra turn).
pub struct SmokeScreen {
    base: SkillBase,
}

impl SmokeScreen {
    const STEALTH_TURNS: u32 = 2;

    pub fn new(base: SkillBase) -> Self {
        Self { base }
    }
}

impl SkillDefinition for SmokeScreen {
    fn base(&self) -> &SkillBase {
        &self.base
    }

    fn execute(&self, ctx: &SkillContext<'_>) -> SkillOutcome {
        let turns = Self::STEALTH_TURNS + u32::from(ctx.has_upgrade("LINGER"));
        SkillOutcome::new(vec![
            AtomicEffect::SetStealth {
                target: ctx.actor.id,
                turns,
            },
            AtomicEffect::Juice {
                event: VisualEvent::Flash {
                    position: ctx.actor.position,
                },
            },
            AtomicEffect::message(format!("{} vanishes into the smoke", ctx.actor.archetype)),
        ])
    }
}

#[cfg(all(test, feature = "loaders"))]
mod tests {
    use hexbound_core::state::{ActorId, Faction, Trap};

    use super::*;
    use crate::skills::testing::*;
    use crate::skills::{SET_TRAP, SMOKE_SCREEN};

    #[test]
    fn trap_goes_on_an_open_neighbour() {
        let state = board();
        assert_eq!(
            cast(&state, SET_TRAP, Some(Point::new(5, 4)), &["BARBED"]).effects,
            vec![AtomicEffect::PlaceTrap {
                position: Point::new(5, 4),
                owner: ActorId::PLAYER,
                damage: 3,
            }]
        );
        assert!(!cast(&state, SET_TRAP, Some(Point::new(6, 4)), &[]).consumes_turn);
    }

    #[test]
    fn armed_cells_are_not_offered_twice() {
        let mut state = board();
        state.traps.push(Trap {
            position: Point::new(5, 4),
            owner: ActorId::PLAYER,
            faction: Faction::Player,
            damage: 2,
            armed: true,
        });
        let cells = targets(&state, SET_TRAP, Point::new(4, 4));
        assert_eq!(cells.len(), 5);
        assert!(!cells.contains(&Point::new(5, 4)));
    }

    #[test]
    fn smoke_sets_stealth_on_the_caster() {
        let state = board();
        let outcome = cast(&state, SMOKE_SCREEN, None, &["LINGER"]);
        assert_eq!(
            outcome.effects[0],
            AtomicEffect::SetStealth {
                target: ActorId::PLAYER,
                turns: 3,
            }
        );
    }
}
