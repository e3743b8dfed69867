//! Shared fixtures for the core's unit tests: a small skill set and a couple
//! of hand-built boards.

use crate::action::AtomicEffect;
use crate::config::GameConfig;
use crate::diagnostics::RecordingSink;
use crate::env::{GameEnv, SkillBase, SkillBook, SkillContext, SkillDefinition, SkillKind, SkillOutcome};
use crate::physics::{KineticPulse, process_kinetic_pulse};
use crate::state::{
    Actor, ActorId, Faction, GameState, GridBounds, Point, SkillId, SkillSlot, TileGrid,
};

pub(crate) struct Fixture {
    pub skills: SkillBook,
    pub config: GameConfig,
    pub sink: RecordingSink,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            skills: test_skills(),
            config: GameConfig::default(),
            sink: RecordingSink::new(),
        }
    }

    pub fn env(&self) -> GameEnv<'_> {
        GameEnv::new(&self.skills, &self.config, &self.sink)
    }
}

#[derive(Clone, Copy)]
enum Behavior {
    Step,
    Strike(&'static str),
    Shove,
}

struct TestSkill {
    base: SkillBase,
    behavior: Behavior,
}

impl TestSkill {
    fn new(base: SkillBase, behavior: Behavior) -> Self {
        Self { base, behavior }
    }
}

impl SkillDefinition for TestSkill {
    fn base(&self) -> &SkillBase {
        &self.base
    }

    fn execute(&self, ctx: &SkillContext<'_>) -> SkillOutcome {
        let Some(target) = ctx.target else {
            return SkillOutcome::declined("No target");
        };
        let origin = ctx.actor.position;
        match self.behavior {
            Behavior::Step => {
                if !self.valid_targets(ctx.state, origin).contains(&target) {
                    return SkillOutcome::declined("Cannot move there");
                }
                SkillOutcome::new(vec![AtomicEffect::step(ctx.actor.id, origin, target)])
            }
            Behavior::Strike(reason) => SkillOutcome::new(vec![AtomicEffect::damage_cell(
                target,
                self.base.damage,
                reason,
            )]),
            Behavior::Shove => match origin.direction_to(target) {
                Some(direction) => SkillOutcome::new(process_kinetic_pulse(
                    KineticPulse::new(target, direction, self.base.momentum),
                    ctx.state,
                )),
                None => SkillOutcome::declined("Not in line"),
            },
        }
    }

    fn valid_targets(&self, state: &GameState, origin: Point) -> Vec<Point> {
        let cells = origin.neighbors().into_iter();
        match self.behavior {
            Behavior::Step => cells
                .filter(|cell| state.is_free(*cell) && state.tiles.is_walkable(*cell))
                .collect(),
            _ => cells.filter(|cell| state.tiles.in_bounds(*cell)).collect(),
        }
    }
}

fn test_skills() -> SkillBook {
    let mut step = SkillBase::new(SkillId::BASIC_MOVE, SkillKind::Movement);
    step.name = "Step".into();

    let mut attack = SkillBase::new("BASIC_ATTACK", SkillKind::Attack);
    attack.name = "Strike".into();
    attack.damage = 1;

    let mut auto = SkillBase::new(SkillId::AUTO_ATTACK, SkillKind::Attack);
    auto.name = "Riposte".into();
    auto.damage = 1;
    auto.passive = true;

    let mut slam = SkillBase::new("HEAVY_SLAM", SkillKind::Attack);
    slam.name = "Heavy Slam".into();
    slam.damage = 3;
    slam.cooldown = 2;
    slam.telegraphed = true;

    let mut shove = SkillBase::new("SHOVE", SkillKind::Attack);
    shove.name = "Shove".into();
    shove.cooldown = 3;
    shove.momentum = 3;
    shove.upgrades = vec!["WIDE".into(), "FAR".into()];

    SkillBook::new()
        .with(TestSkill::new(step, Behavior::Step))
        .with(TestSkill::new(attack, Behavior::Strike("attack")))
        .with(TestSkill::new(auto, Behavior::Strike("auto_attack")))
        .with(TestSkill::new(slam, Behavior::Strike("slam")))
        .with(TestSkill::new(shove, Behavior::Shove))
}

fn player_at(position: Point) -> Actor {
    Actor::new(ActorId::PLAYER, "Player", Faction::Player, position)
        .with_hp(5)
        .with_skill(SkillSlot::new(SkillId::BASIC_MOVE, 0))
        .with_skill(SkillSlot::new("BASIC_ATTACK", 0))
        .with_skill(SkillSlot::new(SkillId::AUTO_ATTACK, 0))
}

/// 9x9 floor with the player at (1,1) and nobody else.
pub(crate) fn open_field() -> GameState {
    GameState::new(
        "fixture",
        player_at(Point::new(1, 1)),
        TileGrid::new(GridBounds::new(9, 9)),
        &GameConfig::default(),
    )
}

/// Player at (1,1) next to a brute at (2,1) that can slam.
pub(crate) fn duel() -> GameState {
    let mut state = open_field();
    let brute = Actor::new(ActorId(1), "Brute", Faction::Enemy, Point::new(2, 1))
        .with_hp(3)
        .with_skill(SkillSlot::new(SkillId::BASIC_MOVE, 0))
        .with_skill(SkillSlot::new("BASIC_ATTACK", 0))
        .with_skill(SkillSlot::new("HEAVY_SLAM", 2));
    state
        .spawn_actor(brute)
        .expect("the duel board has room for the brute");
    state
}

/// A plain enemy that can walk and hit.
pub(crate) fn footman(position: Point) -> Actor {
    Actor::new(ActorId(1), "Footman", Faction::Enemy, position)
        .with_hp(3)
        .with_skill(SkillSlot::new(SkillId::BASIC_MOVE, 0))
        .with_skill(SkillSlot::new("BASIC_ATTACK", 0))
}
