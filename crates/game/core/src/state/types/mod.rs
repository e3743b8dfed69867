pub mod actor;
pub mod events;
pub mod frame;
pub mod hex;
pub mod initiative;
pub mod status;
pub mod tile;
pub mod world;

pub use actor::{
    Actor, ActorId, CompanionMode, Faction, SkillId, SkillSlot, Telegraph, WeightClass,
};
pub use events::{SimulationEvent, VisualEvent};
pub use frame::{FrameKind, GameStatus, PendingFrame, UpgradeOption};
pub use hex::{HexDirection, Point};
pub use initiative::{InitiativeEntry, InitiativeQueue, NeighborSnapshot};
pub use status::{StatusEffect, StatusKind, StatusWindow};
pub use tile::{BaseTile, GridBounds, Tile, TileEffect, TileEffectKind, TileGrid, TileTraits};
pub use world::{ItemKind, OccupancyIndex, Trap, WorldItem};
