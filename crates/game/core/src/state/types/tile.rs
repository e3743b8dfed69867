use std::collections::BTreeMap;

use bitflags::bitflags;

use super::Point;

/// Base terrain of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::AsRefStr, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BaseTile {
    #[default]
    Floor,
    Wall,
    Lava,
    Void,
    Ice,
    Stairs,
    Shrine,
}

impl BaseTile {
    /// Traits every tile of this base type starts with.
    pub const fn default_traits(self) -> TileTraits {
        match self {
            Self::Floor | Self::Stairs | Self::Shrine => TileTraits::WALKABLE,
            Self::Wall => TileTraits::BLOCKS_MOVEMENT.union(TileTraits::BLOCKS_SIGHT),
            Self::Lava => TileTraits::HAZARDOUS.union(TileTraits::LAVA),
            Self::Void => TileTraits::VOID,
            Self::Ice => TileTraits::WALKABLE.union(TileTraits::SLIPPERY),
        }
    }
}

bitflags! {
    /// Behavioural traits consulted by movement, interceptors and physics.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TileTraits: u16 {
        const WALKABLE        = 1 << 0;
        const BLOCKS_MOVEMENT = 1 << 1;
        const BLOCKS_SIGHT    = 1 << 2;
        const HAZARDOUS       = 1 << 3;
        const LAVA            = 1 << 4;
        const VOID            = 1 << 5;
        const SLIPPERY        = 1 << 6;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileEffectKind {
    Fire,
}

/// A timed effect on a tile. `duration` counts actor turns: every end-of-turn
/// window ticks it once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileEffect {
    pub kind: TileEffectKind,
    pub duration: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub base: BaseTile,
    pub traits: TileTraits,
    pub effects: Vec<TileEffect>,
}

impl Tile {
    pub fn new(base: BaseTile) -> Self {
        Self {
            base,
            traits: base.default_traits(),
            effects: Vec::new(),
        }
    }

    pub fn is_on_fire(&self) -> bool {
        self.effects.iter().any(|e| e.kind == TileEffectKind::Fire)
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::new(BaseTile::Floor)
    }
}

/// Axial parallelogram bounds: `0 <= q < width`, `0 <= r < height`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridBounds {
    pub width: i32,
    pub height: i32,
}

impl GridBounds {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub const fn contains(self, point: Point) -> bool {
        point.q >= 0 && point.q < self.width && point.r >= 0 && point.r < self.height
    }

    /// Row-major cell index, used by the occupancy bitmask.
    pub const fn index_of(self, point: Point) -> Option<usize> {
        if self.contains(point) {
            Some((point.r * self.width + point.q) as usize)
        } else {
            None
        }
    }

    pub const fn cell_count(self) -> usize {
        (self.width * self.height) as usize
    }

    pub fn cells(self) -> impl Iterator<Item = Point> {
        (0..self.height).flat_map(move |r| (0..self.width).map(move |q| Point::new(q, r)))
    }
}

impl Default for GridBounds {
    fn default() -> Self {
        Self::new(9, 9)
    }
}

/// Tile layer keyed by coordinate. Cells without an explicit entry are plain
/// floor; cells outside the bounds do not exist.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileGrid {
    pub bounds: GridBounds,
    tiles: BTreeMap<Point, Tile>,
}

impl TileGrid {
    pub fn new(bounds: GridBounds) -> Self {
        Self {
            bounds,
            tiles: BTreeMap::new(),
        }
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        self.bounds.contains(point)
    }

    pub fn set(&mut self, point: Point, base: BaseTile) {
        if base == BaseTile::Floor {
            self.tiles.remove(&point);
        } else {
            self.tiles.insert(point, Tile::new(base));
        }
    }

    pub fn tile(&self, point: Point) -> Option<Tile> {
        if !self.in_bounds(point) {
            return None;
        }
        Some(
            self.tiles
                .get(&point)
                .cloned()
                .unwrap_or_else(|| Tile::new(BaseTile::Floor)),
        )
    }

    pub fn tile_mut(&mut self, point: Point) -> Option<&mut Tile> {
        if !self.in_bounds(point) {
            return None;
        }
        Some(
            self.tiles
                .entry(point)
                .or_insert_with(|| Tile::new(BaseTile::Floor)),
        )
    }

    pub fn base(&self, point: Point) -> Option<BaseTile> {
        if !self.in_bounds(point) {
            return None;
        }
        Some(self.tiles.get(&point).map_or(BaseTile::Floor, |t| t.base))
    }

    pub fn traits(&self, point: Point) -> TileTraits {
        if !self.in_bounds(point) {
            return TileTraits::empty();
        }
        self.tiles
            .get(&point)
            .map_or(BaseTile::Floor.default_traits(), |t| t.traits)
    }

    pub fn has_trait(&self, point: Point, flag: TileTraits) -> bool {
        self.traits(point).contains(flag)
    }

    /// Walls and out-of-bounds cells never admit a unit.
    pub fn is_impassable(&self, point: Point) -> bool {
        !self.in_bounds(point) || self.has_trait(point, TileTraits::BLOCKS_MOVEMENT)
    }

    pub fn is_lava(&self, point: Point) -> bool {
        self.has_trait(point, TileTraits::LAVA)
    }

    pub fn is_void(&self, point: Point) -> bool {
        self.has_trait(point, TileTraits::VOID)
    }

    pub fn is_slippery(&self, point: Point) -> bool {
        self.has_trait(point, TileTraits::SLIPPERY)
    }

    /// Cells a unit may voluntarily end a move on.
    pub fn is_walkable(&self, point: Point) -> bool {
        self.has_trait(point, TileTraits::WALKABLE)
    }

    pub fn is_on_fire(&self, point: Point) -> bool {
        self.tiles.get(&point).is_some_and(Tile::is_on_fire)
    }

    pub fn positions_of(&self, base: BaseTile) -> impl Iterator<Item = Point> + '_ {
        self.tiles
            .iter()
            .filter(move |(_, tile)| tile.base == base)
            .map(|(point, _)| *point)
    }

    pub fn tiles(&self) -> impl Iterator<Item = (&Point, &Tile)> {
        self.tiles.iter()
    }

    pub(crate) fn tiles_mut(&mut self) -> impl Iterator<Item = (&Point, &mut Tile)> {
        self.tiles.iter_mut()
    }
}
