use crate::state::{ActorId, Point, SkillId};

/// A proposed action for one actor's turn, before validation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Intent {
    pub actor_id: ActorId,
    pub skill_id: SkillId,
    pub target_hex: Option<Point>,
    pub target_actor: Option<ActorId>,
    pub priority: i32,
    pub metadata: IntentMetadata,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntentMetadata {
    pub expected_value: i32,
    /// Short code explaining why the intent was chosen (`STUNNED`, `ATTACK`).
    pub reasoning_code: String,
    /// Draws the provider previewed; the loop consumes them after execution.
    pub rng_consumption: u32,
    pub is_ghost: bool,
}

impl Intent {
    pub fn new(actor_id: ActorId, skill_id: impl Into<String>) -> Self {
        Self {
            actor_id,
            skill_id: SkillId::new(skill_id),
            target_hex: None,
            target_actor: None,
            priority: 0,
            metadata: IntentMetadata::default(),
        }
    }

    pub fn wait(actor_id: ActorId, reason: impl Into<String>) -> Self {
        Self::new(actor_id, SkillId::WAIT).with_reason(reason)
    }

    pub fn at(mut self, target: Point) -> Self {
        self.target_hex = Some(target);
        self
    }

    pub fn against(mut self, target: ActorId) -> Self {
        self.target_actor = Some(target);
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.metadata.reasoning_code = reason.into();
        self
    }

    pub fn with_expected_value(mut self, value: i32) -> Self {
        self.metadata.expected_value = value;
        self
    }

    pub fn with_rng_consumption(mut self, draws: u32) -> Self {
        self.metadata.rng_consumption = draws;
        self
    }

    pub fn as_ghost(mut self) -> Self {
        self.metadata.is_ghost = true;
        self
    }

    pub fn is_wait(&self) -> bool {
        self.skill_id.is_wait()
    }
}

/// Result of asking a provider for an intent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IntentOutcome {
    Ready(Intent),
    /// No decision yet; the loop returns and resumes on the next call.
    Suspended,
}
