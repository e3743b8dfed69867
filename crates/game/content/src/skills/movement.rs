use hexbound_core::physics::{KineticPulse, process_kinetic_pulse};
use hexbound_core::state::{GameState, HexDirection, Point, StatusKind, VisualEvent};
use hexbound_core::{AtomicEffect, SkillBase, SkillContext, SkillDefinition, SkillOutcome};

use super::{hostile_on, is_open, open_ray};

/// One step to an adjacent open cell.
pub struct BasicMove {
    base: SkillBase,
}

impl BasicMove {
    pub fn new(base: SkillBase) -> Self {
        Self { base }
    }
}

impl SkillDefinition for BasicMove {
    fn base(&self) -> &SkillBase {
        &self.base
    }

    fn execute(&self, ctx: &SkillContext<'_>) -> SkillOutcome {
        let origin = ctx.actor.position;
        match ctx.target {
            Some(target) if self.valid_targets(ctx.state, origin).contains(&target) => {
                SkillOutcome::new(vec![AtomicEffect::step(ctx.actor.id, origin, target)])
            }
            _ => SkillOutcome::declined("Cannot move there"),
        }
    }

    fn valid_targets(&self, state: &GameState, origin: Point) -> Vec<Point> {
        origin
            .neighbors()
            .into_iter()
            .filter(|cell| is_open(state, *cell))
            .collect()
    }
}

/// Straight-line run. A unit standing right past the landing cell takes the
/// dash's momentum as a kinetic pulse.
///
/// Upgrades: `MOMENTUM` (+2 momentum), `LONG_DASH` (+2 range).
pub struct Dash {
    base: SkillBase,
}

impl Dash {
    pub fn new(base: SkillBase) -> Self {
        Self { base }
    }
}

impl SkillDefinition for Dash {
    fn base(&self) -> &SkillBase {
        &self.base
    }

    fn execute(&self, ctx: &SkillContext<'_>) -> SkillOutcome {
        let origin = ctx.actor.position;
        let Some(target) = ctx.target else {
            return SkillOutcome::declined("No target");
        };
        let Some(direction) = origin.direction_to(target) else {
            return SkillOutcome::declined("Dash runs in straight lines");
        };
        let range = self.base.range + if ctx.has_upgrade("LONG_DASH") { 2 } else { 0 };
        if !open_ray(ctx.state, origin, direction, range).contains(&target) {
            return SkillOutcome::declined("The path is blocked");
        }

        let mut effects = vec![AtomicEffect::step(ctx.actor.id, origin, target)];
        let beyond = target.neighbor(direction);
        if ctx.state.is_occupied(beyond) {
            let momentum = self.base.momentum + if ctx.has_upgrade("MOMENTUM") { 2 } else { 0 };
            effects.extend(process_kinetic_pulse(
                KineticPulse::new(beyond, direction, momentum),
                ctx.state,
            ));
        }
        SkillOutcome::new(effects)
    }

    fn valid_targets(&self, state: &GameState, origin: Point) -> Vec<Point> {
        HexDirection::ALL
            .into_iter()
            .flat_map(|direction| open_ray(state, origin, direction, self.base.range))
            .collect()
    }
}

/// Leap to any open cell in range, stunning the hostiles around the landing.
///
/// Upgrades: `HIGH_JUMP` (+1 range), `LONG_STUN` (stun lasts 2 turns).
pub struct Jump {
    base: SkillBase,
}

impl Jump {
    pub fn new(base: SkillBase) -> Self {
        Self { base }
    }

    fn reachable(state: &GameState, origin: Point, range: u32) -> Vec<Point> {
        state
            .tiles
            .bounds
            .cells()
            .filter(|cell| (1..=range).contains(&origin.distance(*cell)))
            .filter(|cell| is_open(state, *cell))
            .collect()
    }
}

impl SkillDefinition for Jump {
    fn base(&self) -> &SkillBase {
        &self.base
    }

    fn execute(&self, ctx: &SkillContext<'_>) -> SkillOutcome {
        let origin = ctx.actor.position;
        let range = self.base.range + u32::from(ctx.has_upgrade("HIGH_JUMP"));
        let Some(target) = ctx.target else {
            return SkillOutcome::declined("No target");
        };
        if !Self::reachable(ctx.state, origin, range).contains(&target) {
            return SkillOutcome::declined("Cannot land there");
        }

        let stun = if ctx.has_upgrade("LONG_STUN") { 2 } else { 1 };
        let mut effects = vec![AtomicEffect::step(ctx.actor.id, origin, target)];
        effects.extend(
            target
                .neighbors()
                .into_iter()
                .filter_map(|cell| hostile_on(ctx.state, ctx.actor, cell))
                .map(|victim| AtomicEffect::status(victim.id, StatusKind::Stunned, stun)),
        );
        effects.push(AtomicEffect::Juice {
            event: VisualEvent::Shake { intensity: 1 },
        });
        SkillOutcome::new(effects)
    }

    fn valid_targets(&self, state: &GameState, origin: Point) -> Vec<Point> {
        Self::reachable(state, origin, self.base.range)
    }
}
