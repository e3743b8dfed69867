use std::collections::BTreeMap;

use super::{Actor, ActorId, Faction, GridBounds, Point};

/// Items that can lie on the floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::AsRefStr, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ItemKind {
    /// Thrown by `SPEAR_THROW`; the player's `has_spear` flag is cleared while
    /// it lies on the floor.
    Spear,
    /// Dropped shield; mirrors `has_shield`.
    Shield,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldItem {
    pub kind: ItemKind,
    pub position: Point,
}

/// A trap placed on the floor. Armed traps spring on the first hostile unit
/// that lands on them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trap {
    pub position: Point,
    pub owner: ActorId,
    pub faction: Faction,
    pub damage: u32,
    pub armed: bool,
}

impl Trap {
    pub fn springs_on(&self, faction: Faction) -> bool {
        self.armed && self.faction.is_hostile_to(faction)
    }
}

/// Occupied-cell lookup rebuilt from actor positions after every effect fold.
///
/// The bitmask answers "is this cell taken" without touching the map; the map
/// answers "by whom".
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OccupancyIndex {
    bounds: GridBounds,
    mask: Vec<u64>,
    occupants: BTreeMap<Point, ActorId>,
}

impl OccupancyIndex {
    pub fn new(bounds: GridBounds) -> Self {
        Self {
            bounds,
            mask: vec![0; bounds.cell_count().div_ceil(64)],
            occupants: BTreeMap::new(),
        }
    }

    /// Rebuilds the index from living actors. Dead actors never occupy a cell.
    pub fn rebuild<'a>(&mut self, bounds: GridBounds, actors: impl Iterator<Item = &'a Actor>) {
        *self = Self::new(bounds);
        for actor in actors.filter(|actor| actor.is_alive()) {
            self.insert(actor.position, actor.id);
        }
    }

    fn insert(&mut self, position: Point, id: ActorId) {
        if let Some(index) = self.bounds.index_of(position) {
            self.mask[index / 64] |= 1 << (index % 64);
        }
        self.occupants.insert(position, id);
    }

    pub fn is_occupied(&self, position: Point) -> bool {
        match self.bounds.index_of(position) {
            Some(index) => self.mask[index / 64] & (1 << (index % 64)) != 0,
            None => self.occupants.contains_key(&position),
        }
    }

    pub fn occupant(&self, position: Point) -> Option<ActorId> {
        if !self.is_occupied(position) {
            return None;
        }
        self.occupants.get(&position).copied()
    }

    pub fn len(&self) -> usize {
        self.occupants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }
}
