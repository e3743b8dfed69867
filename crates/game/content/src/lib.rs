//! Data-driven content for the hexbound rules core.
//!
//! This crate ships the reference skill set and the arena scenario:
//! - Skill behaviour (pure functions over the game state)
//! - Skill base variables (data-driven via RON)
//! - Actor templates for the player and the enemies (data-driven via RON)
//! - Rule overrides (data-driven via TOML)
//! - Arena floor generation seeded from the run RNG
//!
//! Content never appears in game state; the runtime hands the registry to
//! the engine through `GameEnv`.

pub mod skills;

#[cfg(feature = "loaders")]
pub mod loaders;
#[cfg(feature = "loaders")]
mod pack;
#[cfg(feature = "loaders")]
pub mod scenario;

pub use skills::build_skill_book;

#[cfg(feature = "loaders")]
pub use loaders::{
    ActorTemplate, Bestiary, BestiaryLoader, ConfigLoader, ContentFactory, LoadResult,
    SkillLoader, SkillVars,
};
#[cfg(feature = "loaders")]
pub use pack::ContentPack;
#[cfg(feature = "loaders")]
pub use scenario::{new_run, populate_floor};
