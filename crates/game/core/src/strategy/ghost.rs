use std::collections::VecDeque;

use crate::action::{Intent, IntentOutcome};
use crate::diagnostics::Diagnostic;
use crate::env::GameEnv;
use crate::state::{Actor, GameState};

use super::StrategyProvider;

/// Replays a prerecorded intent list in order.
///
/// Exhaustion and actor mismatches are reported as warnings and answered
/// with WAIT; a mismatched intent is still consumed so the replay keeps
/// moving.
#[derive(Clone, Debug, Default)]
pub struct GhostStrategy {
    intents: VecDeque<Intent>,
}

impl GhostStrategy {
    pub fn new(intents: impl IntoIterator<Item = Intent>) -> Self {
        Self {
            intents: intents.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.intents.len()
    }
}

impl StrategyProvider for GhostStrategy {
    fn get_intent(&mut self, state: &GameState, actor: &Actor, env: &GameEnv<'_>) -> IntentOutcome {
        let Some(intent) = self.intents.pop_front() else {
            env.report(
                Diagnostic::warn("ghost.exhausted", "ghost intents exhausted")
                    .with_actor(actor.id)
                    .at_turn(state.turn_number),
            );
            return IntentOutcome::Ready(Intent::wait(actor.id, "GHOST_EXHAUSTED").as_ghost());
        };

        if intent.actor_id != actor.id {
            env.report(
                Diagnostic::warn(
                    "ghost.desync",
                    format!(
                        "ghost intent for {} replayed on {}'s turn",
                        intent.actor_id, actor.id
                    ),
                )
                .with_actor(actor.id)
                .at_turn(state.turn_number),
            );
            return IntentOutcome::Ready(Intent::wait(actor.id, "GHOST_DESYNC").as_ghost());
        }

        IntentOutcome::Ready(intent.as_ghost())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ActorId, Point};
    use crate::test_support::*;

    #[test]
    fn replays_in_order_then_waits() {
        let fixture = Fixture::new();
        let state = duel();
        let step = Intent::new(ActorId::PLAYER, "BASIC_MOVE").at(Point::new(1, 2));
        let mut ghost = GhostStrategy::new([step.clone()]);

        let IntentOutcome::Ready(first) = ghost.get_intent(&state, &state.player, &fixture.env())
        else {
            panic!("ghost never suspends");
        };
        assert_eq!(first.target_hex, step.target_hex);
        assert!(first.metadata.is_ghost);

        let IntentOutcome::Ready(second) = ghost.get_intent(&state, &state.player, &fixture.env())
        else {
            panic!("ghost never suspends");
        };
        assert!(second.is_wait());
        assert!(fixture.sink.contains("ghost.exhausted"));
    }

    #[test]
    fn mismatch_warns_and_still_shifts() {
        let fixture = Fixture::new();
        let state = duel();
        let brute = state.enemies[0].id;
        let mut ghost = GhostStrategy::new([
            Intent::wait(brute, "IDLE"),
            Intent::wait(ActorId::PLAYER, "IDLE"),
        ]);

        let outcome = ghost.get_intent(&state, &state.player, &fixture.env());
        assert!(matches!(outcome, IntentOutcome::Ready(ref intent) if intent.is_wait()));
        assert!(fixture.sink.contains("ghost.desync"));
        assert_eq!(ghost.remaining(), 1);
    }
}
