//! Deterministic rules core for a hex-grid tactics game.
//!
//! `hexbound-core` owns the canonical rules: the initiative queue, intent
//! providers, the tactical executor, the effect pipeline with its terrain
//! interceptors, kinetic push physics and the turn loop. Everything is pure
//! and single-threaded; state flows in by value and comes back out, and the
//! only randomness is the seeded counter stream carried in [`GameState`].
//!
//! Skill content lives outside the core behind [`SkillRegistry`]; the runtime
//! crate wires a registry, a diagnostics sink and strategies together.
pub mod action;
pub mod combat;
pub mod config;
pub mod diagnostics;
pub mod effect;
pub mod engine;
pub mod env;
pub mod error;
pub mod physics;
pub mod state;
pub mod strategy;

#[cfg(test)]
mod test_support;

pub use action::{
    Action, ActionError, AtomicEffect, CooldownChange, EffectTarget, Intent, IntentMetadata,
    IntentOutcome, Simulation, TacticalExecutor, TacticalResult,
};
pub use combat::danger_tiles;
pub use config::GameConfig;
pub use diagnostics::{Diagnostic, DiagnosticLevel, DiagnosticsSink, NullSink, RecordingSink};
pub use effect::{EffectContext, apply_atomic_effect, apply_effects};
pub use engine::{
    DispatchError, FrameError, FrameResolution, GameEngine, LoopOutcome, LoopStop,
    resolve_pending,
};
pub use env::{
    GameEnv, RngState, SkillBase, SkillBook, SkillContext, SkillDefinition, SkillKind,
    SkillOutcome, SkillRegistry, consume_random, peek_random,
};
pub use error::{ErrorSeverity, GameError};
pub use physics::{KineticPulse, process_kinetic_pulse};
pub use state::{
    Actor, ActorId, BaseTile, Faction, FrameKind, GameState, GameStatus, GridBounds, HexDirection,
    PendingFrame, Point, SkillId, SkillSlot, StateError, StatusKind, TileGrid, WeightClass,
};
pub use strategy::{
    GhostStrategy, HeuristicStrategy, ManualStrategy, StrategyProvider, StrategySet,
};
