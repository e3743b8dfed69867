//! Player-level actions reduced against the state.
//!
//! Each accepted action is appended to the command log and then the turn
//! loop runs until it needs the player again. Replays feed the same actions
//! through the same path, so a recorded log reproduces the run.

use crate::action::{Action, Intent};
use crate::state::{ActorId, GameState, SkillId};
use crate::strategy::StrategySet;

use super::frames::{FrameResolution, resolve_pending};
use super::{DispatchError, GameEngine, LoopOutcome};

impl GameEngine<'_> {
    pub fn dispatch(
        &self,
        mut state: GameState,
        action: Action,
        strategies: &mut StrategySet,
    ) -> Result<LoopOutcome, DispatchError> {
        match &action {
            Action::Move { .. } | Action::UseSkill { .. } | Action::Wait => {
                if let Some(frame) = state.pending.last() {
                    return Err(DispatchError::Blocked(frame.kind()));
                }
                if state.status.is_over() {
                    return Err(DispatchError::GameOver(state.status));
                }
                if !strategies.push_player_intent(player_intent(&action)) {
                    return Err(DispatchError::NotInteractive);
                }
            }
            Action::AdvanceTurn => {}
            Action::ResolvePending => {
                state = resolve_pending(state, FrameResolution::Acknowledge, &self.env)?;
            }
            Action::SelectUpgrade { skill_id, upgrade } => {
                let resolution = FrameResolution::SelectUpgrade {
                    skill_id: skill_id.clone(),
                    upgrade: upgrade.clone(),
                };
                state = resolve_pending(state, resolution, &self.env)?;
            }
        }

        state.command_log.push(action);
        Ok(self.run(state, strategies))
    }
}

fn player_intent(action: &Action) -> Intent {
    match action {
        Action::Move { target } => Intent::new(ActorId::PLAYER, SkillId::BASIC_MOVE).at(*target),
        Action::UseSkill { skill_id, target } => {
            let intent = Intent::new(ActorId::PLAYER, skill_id.as_str());
            match target {
                Some(target) => intent.at(*target),
                None => intent,
            }
        }
        _ => Intent::wait(ActorId::PLAYER, "PLAYER_WAIT"),
    }
}
