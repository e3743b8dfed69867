//! Authoritative game state representation.
//!
//! This module owns the data structures that describe actors, terrain, turn
//! order and the pending-frame stack. Runtime layers clone or query this state
//! but mutate it exclusively through the engine and the effect pipeline.
mod error;
pub mod types;

use std::collections::VecDeque;

pub use error::StateError;
pub use types::*;

use crate::action::Action;
use crate::config::GameConfig;
use crate::env::RngState;

/// Canonical snapshot of the deterministic game state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Seeded draw stream; every consumed value advances its counter.
    pub rng: RngState,
    pub turn_number: u32,
    pub floor: u32,

    pub player: Actor,
    /// Enemies and companions, in spawn order.
    pub enemies: Vec<Actor>,

    pub tiles: TileGrid,
    pub traps: Vec<Trap>,
    pub items: Vec<WorldItem>,
    pub has_spear: bool,
    pub has_shield: bool,

    pub occupancy: OccupancyIndex,
    pub initiative: InitiativeQueue,

    /// Blocking frames; the top of the stack is the last element.
    pub pending: Vec<PendingFrame>,
    pub status: GameStatus,

    pub message_log: MessageLog,
    pub command_log: Vec<Action>,
    pub kills: u32,
    /// Actors removed by damage, in order of death.
    pub dying: Vec<ActorId>,

    pub visual_events: Vec<VisualEvent>,
    pub simulation_events: Vec<SimulationEvent>,

    next_status_id: u32,
    next_actor_id: u32,
}

impl GameState {
    /// Creates the state for a fresh run.
    pub fn new(seed: impl Into<String>, player: Actor, tiles: TileGrid, config: &GameConfig) -> Self {
        let bounds = tiles.bounds;
        let mut state = Self {
            rng: RngState::new(seed),
            turn_number: 0,
            floor: 1,
            player,
            enemies: Vec::new(),
            tiles,
            traps: Vec::new(),
            items: Vec::new(),
            has_spear: false,
            has_shield: false,
            occupancy: OccupancyIndex::new(bounds),
            initiative: InitiativeQueue::new(),
            pending: Vec::new(),
            status: GameStatus::Playing,
            message_log: MessageLog::with_capacity(config.message_log_capacity),
            command_log: Vec::new(),
            kills: 0,
            dying: Vec::new(),
            visual_events: Vec::new(),
            simulation_events: Vec::new(),
            next_status_id: 0,
            next_actor_id: ActorId::PLAYER.0 + 1,
        };
        state.player.id = ActorId::PLAYER;
        state.rebuild_occupancy();
        state
    }

    // ========================================================================
    // Actors
    // ========================================================================

    /// Player first, then the enemy list in spawn order.
    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        std::iter::once(&self.player).chain(self.enemies.iter())
    }

    pub fn living_actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors().filter(|actor| actor.is_alive())
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        if id.is_player() {
            return Some(&self.player);
        }
        self.enemies.iter().find(|actor| actor.id == id)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        if id.is_player() {
            return Some(&mut self.player);
        }
        self.enemies.iter_mut().find(|actor| actor.id == id)
    }

    /// Swaps in a new value for an existing actor. Returns `false` if the
    /// actor is no longer tracked.
    pub fn replace_actor(&mut self, actor: Actor) -> bool {
        match self.actor_mut(actor.id) {
            Some(slot) => {
                *slot = actor;
                true
            }
            None => false,
        }
    }

    /// Inserts a non-player actor under a freshly allocated id.
    pub fn spawn_actor(&mut self, mut actor: Actor) -> Result<ActorId, StateError> {
        if self.enemies.len() + 1 >= GameConfig::MAX_ACTORS {
            return Err(StateError::ActorListFull {
                max: GameConfig::MAX_ACTORS,
            });
        }
        if !self.tiles.in_bounds(actor.position) {
            return Err(StateError::PositionOutOfBounds {
                position: actor.position,
            });
        }
        if let Some(occupant) = self.occupant_at(actor.position) {
            return Err(StateError::PositionOccupied {
                position: actor.position,
                occupant,
            });
        }
        let id = self.allocate_actor_id()?;
        actor.id = id;
        self.enemies.push(actor);
        self.rebuild_occupancy();
        Ok(id)
    }

    /// Drops a non-player actor from the enemy list and the initiative queue.
    pub fn remove_actor(&mut self, id: ActorId) -> Option<Actor> {
        let index = self.enemies.iter().position(|actor| actor.id == id)?;
        let actor = self.enemies.remove(index);
        self.initiative.remove(id);
        Some(actor)
    }

    fn allocate_actor_id(&mut self) -> Result<ActorId, StateError> {
        let id = ActorId(self.next_actor_id);
        self.next_actor_id = self
            .next_actor_id
            .checked_add(1)
            .ok_or(StateError::ActorIdOverflow {
                current: self.next_actor_id,
            })?;
        Ok(id)
    }

    pub(crate) fn next_status_id(&mut self) -> String {
        let id = self.next_status_id;
        self.next_status_id += 1;
        format!("status-{id}")
    }

    /// Living actors paired with their initiative speed, in insertion order.
    pub fn roster(&self) -> Vec<(ActorId, i32)> {
        self.living_actors()
            .map(|actor| (actor.id, actor.speed))
            .collect()
    }

    pub fn hostiles_of<'a>(&'a self, actor: &'a Actor) -> impl Iterator<Item = &'a Actor> + 'a {
        self.living_actors()
            .filter(move |other| other.id != actor.id && actor.faction.is_hostile_to(other.faction))
    }

    // ========================================================================
    // Spatial queries
    // ========================================================================

    pub fn rebuild_occupancy(&mut self) {
        let bounds = self.tiles.bounds;
        let mut occupancy = std::mem::take(&mut self.occupancy);
        occupancy.rebuild(bounds, self.actors());
        self.occupancy = occupancy;
    }

    pub fn occupant_at(&self, position: Point) -> Option<ActorId> {
        self.occupancy.occupant(position)
    }

    pub fn is_occupied(&self, position: Point) -> bool {
        self.occupancy.is_occupied(position)
    }

    /// In bounds, not blocked by terrain and not occupied.
    pub fn is_free(&self, position: Point) -> bool {
        !self.tiles.is_impassable(position) && !self.is_occupied(position)
    }

    /// Ids of living actors on the six cells around `position`.
    pub fn neighbor_ids(&self, position: Point) -> NeighborSnapshot {
        position
            .neighbors()
            .into_iter()
            .filter_map(|cell| self.occupant_at(cell))
            .collect()
    }

    pub fn trap_at(&self, position: Point) -> Option<&Trap> {
        self.traps.iter().find(|trap| trap.position == position)
    }

    pub fn item_at(&self, position: Point) -> Option<&WorldItem> {
        self.items.iter().find(|item| item.position == position)
    }

    // ========================================================================
    // Frames and logs
    // ========================================================================

    pub fn is_blocked(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn push_frame(&mut self, frame: PendingFrame) {
        self.pending.push(frame);
    }

    pub fn push_message(&mut self, message: impl Into<String>) {
        self.message_log.push(message.into());
    }

    /// Copy of the state without the side-channel lists, used for digests
    /// and determinism comparisons.
    pub fn without_side_channel(&self) -> Self {
        let mut state = self.clone();
        state.visual_events.clear();
        state.simulation_events.clear();
        state
    }
}

/// Bounded message log; the oldest line is dropped once full.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageLog {
    capacity: usize,
    lines: VecDeque<String>,
}

impl MessageLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            lines: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, line: String) {
        if self.capacity == 0 {
            return;
        }
        while self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
