//! Arena scenario: one 9x9 floor per level, laid out from the run RNG.
//!
//! The player enters at the bottom and leaves by the stairs at the top. A
//! straight lane between the two is always kept clear of hazards. Every
//! layout draw goes through the state's RNG, so the same seed always yields
//! the same floors.

use hexbound_core::state::{BaseTile, GameState, GridBounds, Point, TileGrid};
use hexbound_core::GameConfig;

use crate::ContentPack;
use crate::loaders::{Bestiary, LoadResult};

pub const ARENA: GridBounds = GridBounds::new(9, 9);
pub const PLAYER_SPAWN: Point = Point::new(4, 7);
pub const STAIRS: Point = Point::new(4, 1);

const HAZARDS: [BaseTile; 3] = [BaseTile::Lava, BaseTile::Ice, BaseTile::Void];
const BASE_HAZARDS: u32 = 3;
const BASE_ENEMIES: u32 = 2;
/// Enemies never start closer than this to the player.
const SPAWN_CLEARANCE: u32 = 3;

/// Starts a run on floor 1 with the player template from `pack`.
pub fn new_run(seed: &str, pack: &ContentPack, config: &GameConfig) -> LoadResult<GameState> {
    let player = pack.instantiate(Bestiary::PLAYER, PLAYER_SPAWN)?;
    let mut state = GameState::new(seed, player, TileGrid::new(ARENA), config);
    state.has_shield = true;
    populate_floor(state, pack)
}

/// Replaces the current floor with a fresh layout for `state.floor`.
///
/// Enemies, traps and loose items are cleared, the spear returns to the
/// player's hand and the player is moved to the entrance.
pub fn populate_floor(mut state: GameState, pack: &ContentPack) -> LoadResult<GameState> {
    let stale: Vec<_> = state.enemies.iter().map(|actor| actor.id).collect();
    for id in stale {
        state.remove_actor(id);
    }
    state.traps.clear();
    state.items.clear();
    state.has_spear = true;
    state.player.position = PLAYER_SPAWN;
    state.player.previous_position = None;
    state.player.telegraph = None;

    state.tiles = TileGrid::new(ARENA);
    state.tiles.set(STAIRS, BaseTile::Stairs);
    state.rebuild_occupancy();

    let lane = lane();
    let mut open: Vec<Point> = ARENA
        .cells()
        .filter(|cell| !lane.contains(cell) && cell.distance(PLAYER_SPAWN) > 1)
        .collect();

    if state.floor % 2 == 0 {
        if let Some(cell) = draw_cell(&mut state, &mut open) {
            state.tiles.set(cell, BaseTile::Shrine);
        }
    }

    for _ in 0..BASE_HAZARDS + state.floor {
        let Some(cell) = draw_cell(&mut state, &mut open) else {
            break;
        };
        let hazard = HAZARDS[state.rng.next_index(HAZARDS.len())];
        state.tiles.set(cell, hazard);
    }

    let names = pack.bestiary().enemy_names();
    if names.is_empty() {
        anyhow::bail!("Bestiary has no enemy templates");
    }
    let mut spots: Vec<Point> = ARENA
        .cells()
        .filter(|cell| cell.distance(PLAYER_SPAWN) >= SPAWN_CLEARANCE)
        .filter(|cell| state.tiles.base(*cell) == Some(BaseTile::Floor) && state.is_free(*cell))
        .collect();
    for _ in 0..BASE_ENEMIES + state.floor {
        let Some(cell) = draw_cell(&mut state, &mut spots) else {
            break;
        };
        let name = names[state.rng.next_index(names.len())];
        let enemy = pack.instantiate(name, cell)?;
        state.spawn_actor(enemy)?;
    }

    let floor = state.floor;
    state.push_message(format!("Floor {floor}"));
    Ok(state)
}

/// Cells on the straight line from the entrance to the stairs, both ends
/// included.
fn lane() -> Vec<Point> {
    let mut cells = vec![PLAYER_SPAWN];
    cells.extend(PLAYER_SPAWN.line_to(STAIRS).unwrap_or_default());
    cells
}

/// Removes and returns a random cell from `cells`.
fn draw_cell(state: &mut GameState, cells: &mut Vec<Point>) -> Option<Point> {
    if cells.is_empty() {
        return None;
    }
    let index = state.rng.next_index(cells.len());
    Some(cells.remove(index))
}
