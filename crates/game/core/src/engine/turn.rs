//! One actor turn.

use crate::action::{AtomicEffect, Intent, IntentOutcome, TacticalExecutor, TacticalResult};
use crate::combat::{
    auto_attack_effects, end_of_turn_effects, resolve_telegraph, start_of_turn, tick_end_of_turn,
    tick_tiles,
};
use crate::diagnostics::Diagnostic;
use crate::effect::{EffectContext, apply_effects};
use crate::env::consume_random;
use crate::state::{ActorId, GameState, Point, SkillId};
use crate::strategy::StrategySet;

use super::frames::{check_arrival, check_defeat};
use super::initiative::{end_actor_turn, next_actor, start_actor_turn};
use super::{GameEngine, LoopStop, Step};

impl GameEngine<'_> {
    pub(super) fn step(&self, mut state: GameState, strategies: &mut StrategySet) -> Step {
        let Some(actor_id) = next_actor(&mut state) else {
            return Step::Stop(state, LoopStop::NoActors);
        };
        // Nothing moves the player while its turn is suspended, so this is
        // also the start of a resumed turn.
        let player_start = state.player.position;

        let mut stunned = false;
        if start_actor_turn(&mut state, actor_id) {
            stunned = start_of_turn(&mut state, actor_id).stunned;
            let telegraph = resolve_telegraph(&state, actor_id, &self.env).into_effects();
            state = self.resolve(state, telegraph);
            if let Some(kind) = check_defeat(&mut state) {
                return Step::Stop(state, LoopStop::PendingFrame(kind));
            }
        }

        let Some(actor) = state
            .actor(actor_id)
            .filter(|actor| actor.is_alive())
            .cloned()
        else {
            end_actor_turn(&mut state, actor_id);
            return Step::Continue(state);
        };

        let provider = strategies.provider_mut(actor_id);
        let interactive = provider.is_interactive();
        let intent = if stunned {
            Intent::wait(actor_id, "STUNNED")
        } else {
            match provider.get_intent(&state, &actor, &self.env) {
                IntentOutcome::Suspended => {
                    return Step::Stop(state, LoopStop::AwaitingInput(actor_id));
                }
                IntentOutcome::Ready(intent) if intent.actor_id != actor_id => {
                    self.env.report(
                        Diagnostic::warn(
                            "loop.intent_actor_mismatch",
                            format!("intent for {} offered on {actor_id}'s turn", intent.actor_id),
                        )
                        .with_actor(actor_id)
                        .at_turn(state.turn_number),
                    );
                    Intent::wait(actor_id, "MISMATCH")
                }
                IntentOutcome::Ready(intent) => intent,
            }
        };

        let (intent, result) = match self.decide(&intent, &state) {
            result if result.consumes_turn => (intent, result),
            rejected => {
                for message in rejected.messages {
                    state.push_message(message);
                }
                if interactive {
                    return Step::Stop(state, LoopStop::AwaitingInput(actor_id));
                }
                self.env.report(
                    Diagnostic::warn(
                        "loop.intent_rejected",
                        format!("{} could not use {}; waiting", actor.archetype, intent.skill_id),
                    )
                    .with_actor(actor_id)
                    .at_turn(state.turn_number),
                );
                let wait = Intent::wait(actor_id, "REJECTED");
                let result = self.decide(&wait, &state);
                (wait, result)
            }
        };

        for message in result.messages {
            state.push_message(message);
        }
        state = self.resolve(state, result.effects);
        if let Some(kind) = check_defeat(&mut state) {
            return Step::Stop(state, LoopStop::PendingFrame(kind));
        }

        let used = (!intent.is_wait()).then_some(&intent.skill_id);
        self.finish_turn(
            state,
            actor_id,
            used,
            intent.metadata.rng_consumption,
            player_start,
        )
    }

    /// Fires the intent, or declares it when it names a telegraphed skill of
    /// a non-player actor.
    fn decide(&self, intent: &Intent, state: &GameState) -> TacticalResult {
        let executor = TacticalExecutor::new(self.env);
        let telegraphed = !intent.actor_id.is_player()
            && self
                .env
                .skills
                .base(&intent.skill_id)
                .is_some_and(|base| base.telegraphed);
        if telegraphed {
            executor.declare(intent, state)
        } else {
            executor.execute(intent, state)
        }
    }

    fn resolve(&self, state: GameState, effects: Vec<AtomicEffect>) -> GameState {
        apply_effects(state, effects, &EffectContext::new(&self.env))
    }

    fn finish_turn(
        &self,
        mut state: GameState,
        actor_id: ActorId,
        used: Option<&SkillId>,
        draws: u32,
        player_start: Point,
    ) -> Step {
        let owed = end_of_turn_effects(&state, actor_id, self.env.config);
        state = self.resolve(state, owed);
        tick_end_of_turn(&mut state, actor_id, used);
        if actor_id.is_player() {
            tick_tiles(&mut state);
        }
        if let Some(kind) = check_defeat(&mut state) {
            return Step::Stop(state, LoopStop::PendingFrame(kind));
        }

        let strikes = auto_attack_effects(&state, actor_id, &self.env);
        state = self.resolve(state, strikes);
        if let Some(kind) = check_defeat(&mut state) {
            return Step::Stop(state, LoopStop::PendingFrame(kind));
        }

        let arrival = check_arrival(&mut state, &self.env, player_start);

        end_actor_turn(&mut state, actor_id);
        for _ in 0..draws {
            state = consume_random(state).1;
        }

        match arrival {
            Some(kind) => Step::Stop(state, LoopStop::PendingFrame(kind)),
            None => Step::Continue(state),
        }
    }
}
