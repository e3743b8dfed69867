//! Tactical executor: turns a validated intent into atomic effects.
//!
//! 1. **WAIT** short-circuits with no effects and consumes the turn
//! 2. **Validation** checks loadout, registration, cooldown and resolves the
//!    target (see `validation`)
//! 3. **Execution** calls the skill's pure `execute` with the actor's upgrades
//!    and appends the cooldown reset when the turn is consumed
//!
//! Validation failures never propagate as errors: they become a message and
//! an unconsumed turn, so the caller can ask again.

mod validation;

use crate::action::{ActionError, AtomicEffect, CooldownChange, Intent};
use crate::diagnostics::{Diagnostic, NullSink};
use crate::effect::{EffectContext, apply_effects};
use crate::env::{GameEnv, SkillContext};
use crate::state::{ActorId, GameState};

use validation::pre_validate;

/// Everything one intent produced.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct TacticalResult {
    pub effects: Vec<AtomicEffect>,
    pub messages: Vec<String>,
    pub consumes_turn: bool,
    pub target_id: Option<ActorId>,
    pub kills: u32,
}

impl TacticalResult {
    fn rejected(error: &ActionError) -> Self {
        Self {
            messages: vec![error.to_string()],
            ..Self::default()
        }
    }

    fn waited() -> Self {
        Self {
            consumes_turn: true,
            ..Self::default()
        }
    }
}

/// Outcome of a dry run: the result plus the state it would lead to.
#[derive(Clone, Debug)]
pub struct Simulation {
    pub result: TacticalResult,
    pub state: GameState,
}

pub struct TacticalExecutor<'a> {
    env: GameEnv<'a>,
}

impl<'a> TacticalExecutor<'a> {
    pub fn new(env: GameEnv<'a>) -> Self {
        Self { env }
    }

    pub fn execute(&self, intent: &Intent, state: &GameState) -> TacticalResult {
        if intent.is_wait() {
            return TacticalResult::waited();
        }

        let validated = match pre_validate(intent, state, &self.env) {
            Ok(validated) => validated,
            Err(error) => return self.reject(intent, state, &error),
        };

        let ctx = SkillContext {
            state,
            actor: validated.actor,
            target: validated.target,
            upgrades: &validated.slot.upgrades,
            config: self.env.config,
        };
        let outcome = validated.skill.execute(&ctx);

        let mut effects = outcome.effects;
        if outcome.consumes_turn && validated.slot.cooldown > 0 {
            effects.push(AtomicEffect::ModifyCooldown {
                actor: validated.actor.id,
                skill_id: validated.slot.id.clone(),
                change: CooldownChange::Set(validated.slot.cooldown),
            });
        }

        TacticalResult {
            effects,
            messages: outcome.messages,
            consumes_turn: outcome.consumes_turn,
            target_id: intent
                .target_actor
                .or_else(|| validated.target.and_then(|hex| state.occupant_at(hex))),
            kills: outcome.kills,
        }
    }

    /// Validates a telegraphed skill and declares it instead of firing it.
    /// The skill resolves at the start of the actor's next turn.
    pub fn declare(&self, intent: &Intent, state: &GameState) -> TacticalResult {
        let validated = match pre_validate(intent, state, &self.env) {
            Ok(validated) => validated,
            Err(error) => return self.reject(intent, state, &error),
        };
        let Some(target) = validated.target else {
            return self.reject(intent, state, &ActionError::NoValidTarget);
        };

        TacticalResult {
            effects: vec![
                AtomicEffect::SetTelegraph {
                    actor: validated.actor.id,
                    skill_id: intent.skill_id.clone(),
                    target,
                },
                AtomicEffect::message(format!(
                    "{} prepares {}",
                    validated.actor.archetype,
                    validated.skill.base().name
                )),
            ],
            messages: Vec::new(),
            consumes_turn: true,
            target_id: intent.target_actor,
            kills: 0,
        }
    }

    /// Runs the same resolution plus the effect pipeline on a clone of
    /// `state`. The caller's state is never touched and no diagnostics are
    /// emitted.
    pub fn simulate(&self, intent: &Intent, state: &GameState) -> Simulation {
        let quiet = NullSink;
        let env = GameEnv::new(self.env.skills, self.env.config, &quiet);
        let result = TacticalExecutor::new(env).execute(intent, state);
        let projected = apply_effects(
            state.clone(),
            result.effects.clone(),
            &EffectContext::new(&env),
        );
        Simulation {
            result,
            state: projected,
        }
    }

    fn reject(&self, intent: &Intent, state: &GameState, error: &ActionError) -> TacticalResult {
        self.env.report(
            Diagnostic::from_error(error)
                .with_actor(intent.actor_id)
                .at_turn(state.turn_number),
        );
        TacticalResult::rejected(error)
    }
}
