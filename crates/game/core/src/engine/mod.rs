//! Turn loop.
//!
//! [`GameEngine::run`] drives actor turns until something needs the outside
//! world: a human decision, a pending frame, the end of the run, or the
//! iteration cap. Every turn walks the same phases:
//!
//! 1. pick the actor (resume a suspended turn, else advance the queue)
//! 2. start-of-turn window and telegraph resolution (fresh turns only)
//! 3. obtain the intent, execute it, resolve its effects
//! 4. end-of-turn window, auto-attack, arrival rules, end of turn
//!
//! The loop never panics on bad input; problems go to the diagnostics sink
//! and the last valid state is returned.

mod errors;
mod frames;
mod initiative;
mod reducer;
mod turn;

pub use errors::{DispatchError, FrameError};
pub use frames::{FrameResolution, resolve_pending};
pub use initiative::{end_actor_turn, next_actor, remove_from_queue, start_actor_turn};

use crate::diagnostics::Diagnostic;
use crate::env::GameEnv;
use crate::state::{ActorId, FrameKind, GameState, GameStatus};
use crate::strategy::StrategySet;

/// Why [`GameEngine::run`] returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoopStop {
    /// A human-driven actor needs an intent.
    AwaitingInput(ActorId),
    /// This call raised a frame.
    PendingFrame(FrameKind),
    GameOver(GameStatus),
    NoActors,
    IterationCap,
    /// Called while a frame was already waiting for resolution.
    BlockedByFrame,
}

#[derive(Clone, Debug)]
pub struct LoopOutcome {
    pub state: GameState,
    pub stop: LoopStop,
}

impl LoopOutcome {
    fn new(state: GameState, stop: LoopStop) -> Self {
        Self { state, stop }
    }
}

/// Result of one actor turn.
enum Step {
    Continue(GameState),
    Stop(GameState, LoopStop),
}

#[derive(Clone, Copy)]
pub struct GameEngine<'a> {
    env: GameEnv<'a>,
}

impl<'a> GameEngine<'a> {
    pub fn new(env: GameEnv<'a>) -> Self {
        Self { env }
    }

    pub fn env(&self) -> &GameEnv<'a> {
        &self.env
    }

    /// Runs turns until a stop condition. The side-channel lists and the
    /// `dying` list describe this call only.
    pub fn run(&self, mut state: GameState, strategies: &mut StrategySet) -> LoopOutcome {
        state.visual_events.clear();
        state.simulation_events.clear();
        state.dying.clear();

        if let Some(frame) = state.pending.last() {
            let kind = frame.kind();
            self.env.report(
                Diagnostic::warn(
                    "loop.blocked_by_frame",
                    format!("{} must be resolved before the loop can run", kind.as_ref()),
                )
                .at_turn(state.turn_number),
            );
            return LoopOutcome::new(state, LoopStop::BlockedByFrame);
        }
        if state.status.is_over() {
            let status = state.status;
            return LoopOutcome::new(state, LoopStop::GameOver(status));
        }

        for _ in 0..self.env.config.iteration_cap {
            match self.step(state, strategies) {
                Step::Continue(next) => state = next,
                Step::Stop(state, stop) => return LoopOutcome::new(state, stop),
            }
        }

        self.env.report(
            Diagnostic::error(
                "loop.iteration_cap",
                format!(
                    "turn loop stopped after {} iterations",
                    self.env.config.iteration_cap
                ),
            )
            .at_turn(state.turn_number),
        );
        LoopOutcome::new(state, LoopStop::IterationCap)
    }
}
