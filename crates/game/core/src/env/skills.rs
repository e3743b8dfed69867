//! Skill registry interface.
//!
//! Skill content lives outside the core. The engine only needs a way to look
//! a skill up by id, read its base variables and call its pure functions.

use std::collections::BTreeMap;

use crate::action::AtomicEffect;
use crate::config::GameConfig;
use crate::state::{Actor, GameState, Point, SkillId};

/// Broad category used by validation (rooted actors cannot move) and by the
/// heuristic provider when scoring options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::AsRefStr, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SkillKind {
    #[default]
    Attack,
    Movement,
    Utility,
}

/// Static variables shared by every use of a skill.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillBase {
    pub id: SkillId,
    pub name: String,
    pub kind: SkillKind,
    pub cooldown: u32,
    pub range: u32,
    pub damage: u32,
    pub momentum: u32,
    /// Passive skills are triggered by the rules and never chosen as intents.
    pub passive: bool,
    /// Non-player actors declare these one turn ahead instead of firing.
    pub telegraphed: bool,
    pub needs_target: bool,
    /// Upgrades a shrine may offer for this skill.
    pub upgrades: Vec<String>,
}

impl SkillBase {
    pub fn new(id: impl Into<String>, kind: SkillKind) -> Self {
        let id = SkillId::new(id);
        Self {
            name: id.as_str().to_owned(),
            id,
            kind,
            cooldown: 0,
            range: 1,
            damage: 0,
            momentum: 0,
            passive: false,
            telegraphed: false,
            needs_target: true,
            upgrades: Vec::new(),
        }
    }
}

/// Inputs handed to a skill's `execute`.
#[derive(Clone, Copy)]
pub struct SkillContext<'a> {
    pub state: &'a GameState,
    pub actor: &'a Actor,
    pub target: Option<Point>,
    pub upgrades: &'a [String],
    pub config: &'a GameConfig,
}

impl SkillContext<'_> {
    pub fn has_upgrade(&self, upgrade: &str) -> bool {
        self.upgrades.iter().any(|u| u == upgrade)
    }
}

/// What a skill produced. Skills never mutate state; they only describe it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillOutcome {
    pub effects: Vec<AtomicEffect>,
    pub messages: Vec<String>,
    pub consumes_turn: bool,
    pub kills: u32,
}

impl SkillOutcome {
    pub fn new(effects: Vec<AtomicEffect>) -> Self {
        Self {
            effects,
            messages: Vec::new(),
            consumes_turn: true,
            kills: 0,
        }
    }

    /// A declined use: no effects, turn not consumed.
    pub fn declined(message: impl Into<String>) -> Self {
        Self {
            effects: Vec::new(),
            messages: vec![message.into()],
            consumes_turn: false,
            kills: 0,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.messages.push(message.into());
        self
    }

    pub fn with_kills(mut self, kills: u32) -> Self {
        self.kills = kills;
        self
    }
}

pub trait SkillDefinition {
    fn base(&self) -> &SkillBase;

    fn execute(&self, ctx: &SkillContext<'_>) -> SkillOutcome;

    /// Hexes the skill may currently target from `origin`.
    fn valid_targets(&self, _state: &GameState, _origin: Point) -> Vec<Point> {
        Vec::new()
    }

    /// Hexes affected when the skill fires at `target`. Telegraphs resolve
    /// only while a hostile stands inside this footprint.
    fn footprint(&self, _state: &GameState, _origin: Point, target: Point) -> Vec<Point> {
        vec![target]
    }
}

pub trait SkillRegistry {
    fn skill(&self, id: &SkillId) -> Option<&dyn SkillDefinition>;

    fn base(&self, id: &SkillId) -> Option<&SkillBase> {
        self.skill(id).map(SkillDefinition::base)
    }
}

/// Map-backed registry.
#[derive(Default)]
pub struct SkillBook {
    skills: BTreeMap<SkillId, Box<dyn SkillDefinition>>,
}

impl SkillBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, skill: impl SkillDefinition + 'static) -> &mut Self {
        self.skills.insert(skill.base().id.clone(), Box::new(skill));
        self
    }

    pub fn with(mut self, skill: impl SkillDefinition + 'static) -> Self {
        self.register(skill);
        self
    }

    pub fn ids(&self) -> impl Iterator<Item = &SkillId> {
        self.skills.keys()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

impl SkillRegistry for SkillBook {
    fn skill(&self, id: &SkillId) -> Option<&dyn SkillDefinition> {
        self.skills.get(id).map(|skill| skill.as_ref())
    }
}

impl std::fmt::Debug for SkillBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkillBook")
            .field("skills", &self.skills.keys().collect::<Vec<_>>())
            .finish()
    }
}
