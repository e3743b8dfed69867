use crate::action::{Intent, IntentOutcome};
use crate::env::GameEnv;
use crate::state::{Actor, GameState};

use super::StrategyProvider;

/// Human input. Holds at most one pushed intent and suspends the loop until
/// one is available for the asking actor.
#[derive(Clone, Debug, Default)]
pub struct ManualStrategy {
    pending: Option<Intent>,
}

impl ManualStrategy {
    pub fn pending(&self) -> Option<&Intent> {
        self.pending.as_ref()
    }
}

impl StrategyProvider for ManualStrategy {
    fn get_intent(&mut self, _state: &GameState, actor: &Actor, _env: &GameEnv<'_>) -> IntentOutcome {
        match self.pending.take() {
            Some(intent) if intent.actor_id == actor.id => IntentOutcome::Ready(intent),
            other => {
                self.pending = other;
                IntentOutcome::Suspended
            }
        }
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn push_intent(&mut self, intent: Intent) -> bool {
        self.pending = Some(intent);
        true
    }
}
