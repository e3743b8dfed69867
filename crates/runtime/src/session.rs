//! One run of the arena, driven one player action at a time.
//!
//! The session owns the state and the strategy set. Each dispatched action is
//! reduced by the core engine; the loop then runs until the player is needed
//! again or a frame blocks. Descending the stairs regenerates the floor
//! before the loop resumes.

use std::collections::{BTreeSet, VecDeque};

use hexbound_content::{ContentPack, new_run, populate_floor};
use hexbound_core::state::{PendingFrame, Point, SkillId};
use hexbound_core::{
    Action, Diagnostic, DiagnosticsSink, FrameResolution, GameEngine, GameEnv, GameState,
    LoopOutcome, LoopStop, SkillDefinition, SkillRegistry, StrategySet, danger_tiles,
    resolve_pending,
};

use crate::config::RuntimeConfig;
use crate::diagnostics::TracingSink;
use crate::error::{Result, RuntimeError};
use crate::utils::hash::{hash_game_state, short_hash};

pub struct Session {
    config: RuntimeConfig,
    pack: ContentPack,
    sink: TracingSink,
    state: GameState,
    strategies: StrategySet,
    history: VecDeque<GameState>,
    last_stop: LoopStop,
}

impl Session {
    /// Starts a run with the standard content.
    pub fn new(config: RuntimeConfig) -> Result<Self> {
        let pack = ContentPack::standard().map_err(RuntimeError::content)?;
        Self::with_pack(config, pack)
    }

    /// Starts a run and advances it to the player's first decision.
    pub fn with_pack(config: RuntimeConfig, pack: ContentPack) -> Result<Self> {
        let state =
            new_run(&config.seed, &pack, &config.game_config).map_err(RuntimeError::content)?;
        tracing::info!(seed = %config.seed, enemies = state.enemies.len(), "run started");

        let mut session = Self {
            config,
            pack,
            sink: TracingSink::default(),
            state,
            strategies: StrategySet::interactive(),
            history: VecDeque::new(),
            last_stop: LoopStop::NoActors,
        };
        let outcome = engine(&session.pack, &session.config, &session.sink)
            .run(session.state.clone(), &mut session.strategies);
        session.settle(outcome);
        Ok(session)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn pack(&self) -> &ContentPack {
        &self.pack
    }

    /// Why the loop last returned.
    pub fn last_stop(&self) -> LoopStop {
        self.last_stop
    }

    /// Diagnostics recorded so far, oldest first.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.sink.recent()
    }

    /// Reduces one player action and runs the loop.
    ///
    /// Acknowledging a stairs transition builds the next floor before the
    /// loop resumes. On error the state is left untouched.
    pub fn dispatch(&mut self, action: Action) -> Result<LoopStop> {
        let before = self.state.clone();
        let descending = matches!(action, Action::ResolvePending)
            && matches!(
                self.state.pending.last(),
                Some(PendingFrame::StairsTransition { .. })
            );

        let result = if descending {
            self.descend(before.clone(), action.clone())
        } else {
            engine(&self.pack, &self.config, &self.sink)
                .dispatch(before.clone(), action.clone(), &mut self.strategies)
                .map_err(RuntimeError::from)
        };
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(error) => {
                self.report_rejection(&error);
                return Err(error);
            }
        };

        tracing::debug!(
            action = action.type_name(),
            turn = outcome.state.turn_number,
            stop = ?outcome.stop,
            "action dispatched"
        );
        self.remember(before);
        Ok(self.settle(outcome))
    }

    fn descend(&mut self, state: GameState, action: Action) -> Result<LoopOutcome> {
        let engine = engine(&self.pack, &self.config, &self.sink);
        let mut state = resolve_pending(state, FrameResolution::Acknowledge, engine.env())?;
        state = populate_floor(state, &self.pack).map_err(RuntimeError::content)?;
        state.command_log.push(action);
        tracing::info!(floor = state.floor, enemies = state.enemies.len(), "floor entered");
        Ok(engine.run(state, &mut self.strategies))
    }

    /// Rule errors go to the diagnostics sink under their stable codes.
    fn report_rejection(&self, error: &RuntimeError) {
        let diagnostic = match error {
            RuntimeError::Dispatch(error) => Diagnostic::from_error(error),
            RuntimeError::Frame(error) => Diagnostic::from_error(error),
            _ => return,
        };
        self.sink.record(diagnostic.at_turn(self.state.turn_number));
    }

    fn remember(&mut self, state: GameState) {
        if self.config.undo_depth == 0 {
            return;
        }
        while self.history.len() >= self.config.undo_depth {
            self.history.pop_front();
        }
        self.history.push_back(state);
    }

    fn settle(&mut self, outcome: LoopOutcome) -> LoopStop {
        self.state = outcome.state;
        self.last_stop = outcome.stop;
        self.last_stop
    }

    /// Restores the state from before the last dispatched action. Returns
    /// `false` when the history is empty.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.pop_back() else {
            return false;
        };
        self.state = previous;
        self.strategies = StrategySet::interactive();
        self.last_stop = match self.state.pending.last() {
            Some(frame) => LoopStop::PendingFrame(frame.kind()),
            None if self.state.status.is_over() => LoopStop::GameOver(self.state.status),
            None => LoopStop::AwaitingInput(self.state.player.id),
        };
        tracing::debug!(turn = self.state.turn_number, "undo");
        true
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Cells the player could target with `skill_id` right now.
    pub fn valid_targets(&self, skill_id: &str) -> Vec<Point> {
        let id = SkillId::new(skill_id);
        if !self.state.player.has_skill(skill_id) {
            return Vec::new();
        }
        self.pack
            .skills()
            .skill(&id)
            .map(|skill| skill.valid_targets(&self.state, self.state.player.position))
            .unwrap_or_default()
    }

    /// Cells enemy telegraphs would hit if they fired now.
    pub fn danger_tiles(&self) -> BTreeSet<Point> {
        danger_tiles(
            &self.state,
            engine(&self.pack, &self.config, &self.sink).env(),
        )
    }

    /// Digest of the canonical state.
    pub fn digest(&self) -> Result<String> {
        let digest = hash_game_state(&self.state).map_err(RuntimeError::Encode)?;
        tracing::trace!(digest = short_hash(&digest), "state digest");
        Ok(digest)
    }
}

fn engine<'a>(
    pack: &'a ContentPack,
    config: &'a RuntimeConfig,
    sink: &'a TracingSink,
) -> GameEngine<'a> {
    GameEngine::new(GameEnv::new(pack.skills(), &config.game_config, sink))
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("seed", &self.config.seed)
            .field("floor", &self.state.floor)
            .field("turn", &self.state.turn_number)
            .field("last_stop", &self.last_stop)
            .field("history", &self.history.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use hexbound_core::state::{ActorId, BaseTile, FrameKind};
    use hexbound_core::DispatchError;

    use super::*;

    fn session(seed: &str) -> Session {
        Session::new(RuntimeConfig::default().with_seed(seed)).unwrap()
    }

    #[test]
    fn new_session_waits_for_the_player() {
        let session = session("start");
        assert_eq!(session.last_stop(), LoopStop::AwaitingInput(ActorId::PLAYER));
        assert_eq!(session.state().floor, 1);
        assert_eq!(session.history_len(), 0);
    }

    #[test]
    fn dispatch_records_history_and_undo_restores_it() {
        let mut session = session("undo");
        let before = session.state().clone();

        session.dispatch(Action::Wait).unwrap();
        assert_eq!(session.history_len(), 1);
        assert_eq!(session.state().command_log, vec![Action::Wait]);

        assert!(session.undo());
        assert_eq!(session.state(), &before);
        assert!(!session.undo());
    }

    #[test]
    fn undo_depth_bounds_the_history() {
        let mut config = RuntimeConfig::default().with_seed("depth");
        config.undo_depth = 2;
        let mut session = Session::new(config).unwrap();
        for _ in 0..4 {
            if session.dispatch(Action::Wait).is_err() {
                break;
            }
        }
        assert!(session.history_len() <= 2);
    }

    #[test]
    fn frame_resolution_without_a_frame_is_an_error() {
        let mut session = session("frames");
        let before = session.state().clone();
        let err = session.dispatch(Action::ResolvePending).unwrap_err();
        assert!(matches!(err, RuntimeError::Dispatch(DispatchError::Frame(_))));
        assert_eq!(session.state(), &before);
        assert_eq!(session.history_len(), 0);
        assert!(
            session
                .diagnostics()
                .iter()
                .any(|diagnostic| diagnostic.code == "FRAME_NOTHING_PENDING")
        );
    }

    #[test]
    fn stairs_lead_to_a_fresh_floor() {
        let mut session = session("stairs");
        // Put the stairs right next to the player and clear the way.
        let start = session.state.player.position;
        let stairs = start.neighbors()[2];
        session.state.tiles.set(stairs, BaseTile::Stairs);
        let blockers: Vec<_> = session
            .state
            .enemies
            .iter()
            .filter(|e| e.position == stairs)
            .map(|e| e.id)
            .collect();
        for id in blockers {
            session.state.remove_actor(id);
        }
        session.state.rebuild_occupancy();

        let stop = session.dispatch(Action::Move { target: stairs }).unwrap();
        assert_eq!(stop, LoopStop::PendingFrame(FrameKind::StairsTransition));
        assert!(matches!(
            session.dispatch(Action::Wait),
            Err(RuntimeError::Dispatch(DispatchError::Blocked(_)))
        ));
        let stop = session.dispatch(Action::ResolvePending).unwrap();
        assert_eq!(session.state().floor, 2);
        assert_eq!(session.state().enemies.len(), 4);
        assert!(session.state().pending.is_empty());
        assert!(matches!(
            stop,
            LoopStop::AwaitingInput(_) | LoopStop::PendingFrame(FrameKind::RunLost)
        ));
        assert_eq!(session.state().command_log.last(), Some(&Action::ResolvePending));
    }

    #[test]
    fn valid_targets_only_for_owned_skills() {
        let session = session("targets");
        assert!(!session.valid_targets("BASIC_MOVE").is_empty());
        assert!(session.valid_targets("HEAVY_SLAM").is_empty());
        assert!(session.valid_targets("NOT_A_SKILL").is_empty());
    }
}
