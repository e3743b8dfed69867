//! Intent providers.
//!
//! The turn loop asks a [`StrategyProvider`] for each actor's intent. Humans
//! are modelled as a provider that suspends until an intent is pushed; AI and
//! replays never suspend.

mod ghost;
mod heuristic;
mod manual;

pub use ghost::GhostStrategy;
pub use heuristic::HeuristicStrategy;
pub use manual::ManualStrategy;

use std::collections::BTreeMap;

use crate::action::{Intent, IntentOutcome};
use crate::env::GameEnv;
use crate::state::{Actor, ActorId, GameState};

pub trait StrategyProvider {
    /// Proposes the intent for `actor`'s current turn. Every ready intent
    /// names a skill the actor owns, or WAIT.
    fn get_intent(
        &mut self,
        state: &GameState,
        actor: &Actor,
        env: &GameEnv<'_>,
    ) -> IntentOutcome;

    /// True for providers driven by a human; their rejected intents suspend
    /// the loop instead of becoming a WAIT.
    fn is_interactive(&self) -> bool {
        false
    }

    /// Hands the provider an externally chosen intent. Returns false when the
    /// provider does not take input.
    fn push_intent(&mut self, _intent: Intent) -> bool {
        false
    }
}

/// Maps actors to providers: one for the player, optional per-actor
/// overrides, and a default for everyone else.
pub struct StrategySet {
    player: Box<dyn StrategyProvider>,
    overrides: BTreeMap<ActorId, Box<dyn StrategyProvider>>,
    default: Box<dyn StrategyProvider>,
}

impl StrategySet {
    pub fn new(
        player: impl StrategyProvider + 'static,
        default: impl StrategyProvider + 'static,
    ) -> Self {
        Self {
            player: Box::new(player),
            overrides: BTreeMap::new(),
            default: Box::new(default),
        }
    }

    /// Human-controlled player, heuristic enemies and companions.
    pub fn interactive() -> Self {
        Self::new(ManualStrategy::default(), HeuristicStrategy)
    }

    /// Replays `intents` for the player; everyone else stays heuristic.
    pub fn ghost(intents: impl IntoIterator<Item = Intent>) -> Self {
        Self::new(GhostStrategy::new(intents), HeuristicStrategy)
    }

    pub fn with_override(
        mut self,
        actor: ActorId,
        provider: impl StrategyProvider + 'static,
    ) -> Self {
        self.overrides.insert(actor, Box::new(provider));
        self
    }

    pub fn provider_mut(&mut self, actor: ActorId) -> &mut (dyn StrategyProvider + 'static) {
        if actor.is_player() {
            return self.player.as_mut();
        }
        match self.overrides.get_mut(&actor) {
            Some(provider) => provider.as_mut(),
            None => self.default.as_mut(),
        }
    }

    /// Forwards an intent to the player's provider.
    pub fn push_player_intent(&mut self, intent: Intent) -> bool {
        self.player.push_intent(intent)
    }
}

impl std::fmt::Debug for StrategySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategySet")
            .field("player_interactive", &self.player.is_interactive())
            .field("overrides", &self.overrides.keys().collect::<Vec<_>>())
            .finish()
    }
}
