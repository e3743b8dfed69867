//! Read-only collaborators the engine consults.
//!
//! The skill registry, the rule configuration and the diagnostics sink are
//! bundled in [`GameEnv`] so the engine can reach everything it needs without
//! hard coupling to concrete implementations. The deterministic RNG lives here
//! too; its state is part of [`GameState`](crate::state::GameState).
mod rng;
mod skills;

pub use rng::{RngState, consume_random, peek_random};
pub use skills::{
    SkillBase, SkillBook, SkillContext, SkillDefinition, SkillKind, SkillOutcome, SkillRegistry,
};

use crate::config::GameConfig;
use crate::diagnostics::{Diagnostic, DiagnosticsSink};

/// Aggregates the read-only inputs of the turn loop and effect pipeline.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    pub skills: &'a dyn SkillRegistry,
    pub config: &'a GameConfig,
    pub diagnostics: &'a dyn DiagnosticsSink,
}

impl<'a> GameEnv<'a> {
    pub fn new(
        skills: &'a dyn SkillRegistry,
        config: &'a GameConfig,
        diagnostics: &'a dyn DiagnosticsSink,
    ) -> Self {
        Self {
            skills,
            config,
            diagnostics,
        }
    }

    pub fn report(&self, diagnostic: Diagnostic) {
        self.diagnostics.record(diagnostic);
    }
}
