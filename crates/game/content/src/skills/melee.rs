use hexbound_core::physics::{KineticPulse, process_kinetic_pulse};
use hexbound_core::state::{GameState, Point, StatusKind, VisualEvent};
use hexbound_core::{AtomicEffect, SkillBase, SkillContext, SkillDefinition, SkillOutcome};

use super::hostile_faction_at;

fn adjacent_hostiles(state: &GameState, origin: Point) -> Vec<Point> {
    origin
        .neighbors()
        .into_iter()
        .filter(|cell| hostile_faction_at(state, origin, *cell))
        .collect()
}

/// Adjacent strike against whoever stands on the target cell.
pub struct BasicAttack {
    base: SkillBase,
}

impl BasicAttack {
    pub fn new(base: SkillBase) -> Self {
        Self { base }
    }
}

impl SkillDefinition for BasicAttack {
    fn base(&self) -> &SkillBase {
        &self.base
    }

    fn execute(&self, ctx: &SkillContext<'_>) -> SkillOutcome {
        let Some(target) = ctx.target.filter(|cell| cell.is_adjacent(ctx.actor.position)) else {
            return SkillOutcome::declined("Out of reach");
        };
        if !ctx.state.is_occupied(target) {
            return SkillOutcome::declined("Nothing to strike");
        }
        SkillOutcome::new(vec![AtomicEffect::damage_cell(
            target,
            self.base.damage,
            "attack",
        )])
    }

    fn valid_targets(&self, state: &GameState, origin: Point) -> Vec<Point> {
        adjacent_hostiles(state, origin)
    }
}

/// Passive follow-up strike dealt by the rules at the end of a turn.
pub struct AutoAttack {
    base: SkillBase,
}

impl AutoAttack {
    pub fn new(base: SkillBase) -> Self {
        Self { base }
    }
}

impl SkillDefinition for AutoAttack {
    fn base(&self) -> &SkillBase {
        &self.base
    }

    fn execute(&self, ctx: &SkillContext<'_>) -> SkillOutcome {
        match ctx.target {
            Some(target) => SkillOutcome::new(vec![AtomicEffect::damage_cell(
                target,
                self.base.damage,
                "auto_attack",
            )]),
            None => SkillOutcome::declined("No target"),
        }
    }

    fn valid_targets(&self, state: &GameState, origin: Point) -> Vec<Point> {
        adjacent_hostiles(state, origin)
    }
}

/// Shield strike that knocks the target back with a kinetic pulse. The
/// player needs the shield in hand.
///
/// Upgrades: `STUN` (stuns the target for one turn), `HEAVY_BASH`
/// (+2 momentum).
pub struct ShieldBash {
    base: SkillBase,
}

impl ShieldBash {
    pub fn new(base: SkillBase) -> Self {
        Self { base }
    }
}

impl SkillDefinition for ShieldBash {
    fn base(&self) -> &SkillBase {
        &self.base
    }

    fn execute(&self, ctx: &SkillContext<'_>) -> SkillOutcome {
        if ctx.actor.is_player() && !ctx.state.has_shield {
            return SkillOutcome::declined("No shield in hand");
        }
        let origin = ctx.actor.position;
        let Some((target, direction)) = ctx
            .target
            .and_then(|cell| origin.direction_to(cell).map(|dir| (cell, dir)))
            .filter(|(cell, _)| cell.is_adjacent(origin))
        else {
            return SkillOutcome::declined("Out of reach");
        };
        let Some(victim) = ctx.state.occupant_at(target) else {
            return SkillOutcome::declined("Nothing to bash");
        };

        let momentum = self.base.momentum + if ctx.has_upgrade("HEAVY_BASH") { 2 } else { 0 };
        let mut effects = vec![AtomicEffect::damage_cell(target, self.base.damage, "bash")];
        if ctx.has_upgrade("STUN") {
            effects.push(AtomicEffect::status(victim, StatusKind::Stunned, 1));
        }
        effects.extend(process_kinetic_pulse(
            KineticPulse::new(target, direction, momentum),
            ctx.state,
        ));
        effects.push(AtomicEffect::Juice {
            event: VisualEvent::Shake { intensity: 1 },
        });
        SkillOutcome::new(effects)
    }

    fn valid_targets(&self, state: &GameState, origin: Point) -> Vec<Point> {
        adjacent_hostiles(state, origin)
    }
}

/// Heavy overhead blow on an adjacent cell. Usually telegraphed.
pub struct HeavySlam {
    base: SkillBase,
}

impl HeavySlam {
    pub fn new(base: SkillBase) -> Self {
        Self { base }
    }
}

impl SkillDefinition for HeavySlam {
    fn base(&self) -> &SkillBase {
        &self.base
    }

    fn execute(&self, ctx: &SkillContext<'_>) -> SkillOutcome {
        let Some(target) = ctx.target.filter(|cell| cell.is_adjacent(ctx.actor.position)) else {
            return SkillOutcome::declined("Out of reach");
        };
        SkillOutcome::new(vec![
            AtomicEffect::damage_cell(target, self.base.damage, "slam"),
            AtomicEffect::Juice {
                event: VisualEvent::Shake { intensity: 2 },
            },
        ])
    }

    fn valid_targets(&self, state: &GameState, origin: Point) -> Vec<Point> {
        origin
            .neighbors()
            .into_iter()
            .filter(|cell| !state.tiles.is_impassable(*cell))
            .collect()
    }
}
