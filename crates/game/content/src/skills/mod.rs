//! Reference skill set.
//!
//! Each skill pairs its data-driven [`SkillBase`] with pure behaviour: it
//! reads the state through [`SkillContext`] and answers with atomic effects.
//! Nothing here mutates state.

mod melee;
mod movement;
mod ranged;
mod utility;

pub use melee::{AutoAttack, BasicAttack, HeavySlam, ShieldBash};
pub use movement::{BasicMove, Dash, Jump};
pub use ranged::{ArcherShot, Fireball, SpearPickup, SpearThrow};
pub use utility::{SetTrap, SmokeScreen};

use anyhow::bail;
use hexbound_core::state::{Actor, GameState, HexDirection, Point};
use hexbound_core::{SkillBase, SkillBook};

pub const BASIC_MOVE: &str = "BASIC_MOVE";
pub const BASIC_ATTACK: &str = "BASIC_ATTACK";
pub const AUTO_ATTACK: &str = "AUTO_ATTACK";
pub const DASH: &str = "DASH";
pub const SHIELD_BASH: &str = "SHIELD_BASH";
pub const SPEAR_THROW: &str = "SPEAR_THROW";
pub const SPEAR_PICKUP: &str = "SPEAR_PICKUP";
pub const JUMP: &str = "JUMP";
pub const SET_TRAP: &str = "SET_TRAP";
pub const SMOKE_SCREEN: &str = "SMOKE_SCREEN";
pub const HEAVY_SLAM: &str = "HEAVY_SLAM";
pub const ARCHER_SHOT: &str = "ARCHER_SHOT";
pub const FIREBALL: &str = "FIREBALL";

/// Pairs every base with its behaviour. Fails on ids without one.
pub fn build_skill_book(bases: impl IntoIterator<Item = SkillBase>) -> anyhow::Result<SkillBook> {
    let mut book = SkillBook::new();
    for base in bases {
        match base.id.as_str() {
            BASIC_MOVE => book.register(BasicMove::new(base)),
            BASIC_ATTACK => book.register(BasicAttack::new(base)),
            AUTO_ATTACK => book.register(AutoAttack::new(base)),
            DASH => book.register(Dash::new(base)),
            SHIELD_BASH => book.register(ShieldBash::new(base)),
            SPEAR_THROW => book.register(SpearThrow::new(base)),
            SPEAR_PICKUP => book.register(SpearPickup::new(base)),
            JUMP => book.register(Jump::new(base)),
            SET_TRAP => book.register(SetTrap::new(base)),
            SMOKE_SCREEN => book.register(SmokeScreen::new(base)),
            HEAVY_SLAM => book.register(HeavySlam::new(base)),
            ARCHER_SHOT => book.register(ArcherShot::new(base)),
            FIREBALL => book.register(Fireball::new(base)),
            other => bail!("no behaviour for skill {other}"),
        };
    }
    Ok(book)
}

// ============================================================================
// Geometry shared by the skills
// ============================================================================

/// Cells a unit could voluntarily stand on.
fn is_open(state: &GameState, cell: Point) -> bool {
    state.is_free(cell) && state.tiles.is_walkable(cell)
}

/// Open cells walking out from `origin`, up to the first one that is not.
fn open_ray(state: &GameState, origin: Point, direction: HexDirection, range: u32) -> Vec<Point> {
    origin
        .ray(direction, range)
        .take_while(|cell| is_open(state, *cell))
        .collect()
}

/// Cells a projectile can reach: terrain that blocks movement ends the line
/// before the cell, a unit ends it on the cell.
fn sight_line(state: &GameState, origin: Point, direction: HexDirection, range: u32) -> Vec<Point> {
    let mut cells = Vec::new();
    for cell in origin.ray(direction, range) {
        if state.tiles.is_impassable(cell) {
            break;
        }
        cells.push(cell);
        if state.is_occupied(cell) {
            break;
        }
    }
    cells
}

fn hostile_on<'s>(state: &'s GameState, actor: &Actor, cell: Point) -> Option<&'s Actor> {
    state
        .occupant_at(cell)
        .and_then(|id| state.actor(id))
        .filter(|other| other.is_alive() && other.faction.is_hostile_to(actor.faction))
}

fn hostile_faction_at(state: &GameState, origin: Point, cell: Point) -> bool {
    let Some(owner) = state.occupant_at(origin).and_then(|id| state.actor(id)) else {
        return state.is_occupied(cell);
    };
    hostile_on(state, owner, cell).is_some()
}
