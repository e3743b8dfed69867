use std::fmt;

use super::{Point, StatusEffect, StatusKind};

/// Unique identifier for an actor tracked in the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId(pub u32);

impl ActorId {
    /// Reserved identifier for the controllable player character.
    pub const PLAYER: Self = Self(0);

    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of a skill in the registry (`"BASIC_MOVE"`, `"DASH"`, ...).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SkillId(pub String);

impl SkillId {
    pub const WAIT: &'static str = "WAIT";
    pub const BASIC_MOVE: &'static str = "BASIC_MOVE";
    pub const AUTO_ATTACK: &'static str = "AUTO_ATTACK";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn wait() -> Self {
        Self::new(Self::WAIT)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wait(&self) -> bool {
        self.0 == Self::WAIT
    }
}

impl From<&str> for SkillId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl PartialEq<str> for SkillId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::AsRefStr, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Faction {
    Player,
    Enemy,
    Neutral,
}

impl Faction {
    pub fn is_hostile_to(self, other: Faction) -> bool {
        matches!(
            (self, other),
            (Faction::Player, Faction::Enemy) | (Faction::Enemy, Faction::Player)
        )
    }
}

/// Mass class consulted by kinetic push resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeightClass {
    Light,
    #[default]
    Standard,
    Heavy,
    Anchored,
    OuterWall,
}

impl WeightClass {
    /// Momentum spent per cell when this unit is part of a moving chain.
    /// `None` means the unit cannot be displaced at all.
    pub const fn mass(self) -> Option<u32> {
        match self {
            Self::Light | Self::Standard => Some(1),
            Self::Heavy => Some(2),
            Self::Anchored | Self::OuterWall => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::AsRefStr, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CompanionMode {
    Follow,
    Attack,
    Scout,
}

/// One entry of an actor's active skill loadout.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillSlot {
    pub id: SkillId,
    pub cooldown: u32,
    pub current_cooldown: u32,
    pub upgrades: Vec<String>,
}

impl SkillSlot {
    pub fn new(id: impl Into<String>, cooldown: u32) -> Self {
        Self {
            id: SkillId::new(id),
            cooldown,
            current_cooldown: 0,
            upgrades: Vec::new(),
        }
    }

    pub fn with_upgrade(mut self, upgrade: impl Into<String>) -> Self {
        self.upgrades.push(upgrade.into());
        self
    }

    pub fn is_ready(&self) -> bool {
        self.current_cooldown == 0
    }

    pub fn has_upgrade(&self, upgrade: &str) -> bool {
        self.upgrades.iter().any(|u| u == upgrade)
    }
}

/// An enemy's declared next action, resolved one turn later.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Telegraph {
    pub skill_id: SkillId,
    pub target: Point,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Actor {
    pub id: ActorId,
    pub archetype: String,
    pub faction: Faction,
    pub position: Point,
    pub previous_position: Option<Point>,
    pub hp: u32,
    pub max_hp: u32,
    pub temporary_armor: u32,
    /// Initiative score source; higher acts first.
    pub speed: i32,
    pub weight: WeightClass,
    pub statuses: Vec<StatusEffect>,
    pub skills: Vec<SkillSlot>,
    pub companion_of: Option<ActorId>,
    pub companion_mode: Option<CompanionMode>,
    pub stealth_counter: u32,
    pub telegraph: Option<Telegraph>,
}

impl Actor {
    pub fn new(id: ActorId, archetype: impl Into<String>, faction: Faction, position: Point) -> Self {
        Self {
            id,
            archetype: archetype.into(),
            faction,
            position,
            previous_position: None,
            hp: 1,
            max_hp: 1,
            temporary_armor: 0,
            speed: 10,
            weight: WeightClass::Standard,
            statuses: Vec::new(),
            skills: Vec::new(),
            companion_of: None,
            companion_mode: None,
            stealth_counter: 0,
            telegraph: None,
        }
    }

    pub fn with_hp(mut self, hp: u32) -> Self {
        self.hp = hp;
        self.max_hp = hp;
        self
    }

    pub fn with_speed(mut self, speed: i32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_weight(mut self, weight: WeightClass) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_armor(mut self, armor: u32) -> Self {
        self.temporary_armor = armor;
        self
    }

    pub fn with_skill(mut self, slot: SkillSlot) -> Self {
        self.skills.push(slot);
        self
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn is_player(&self) -> bool {
        self.id.is_player()
    }

    pub fn is_stealthed(&self) -> bool {
        self.stealth_counter > 0
    }

    pub fn skill(&self, id: &SkillId) -> Option<&SkillSlot> {
        self.skills.iter().find(|slot| slot.id == *id)
    }

    pub fn skill_mut(&mut self, id: &SkillId) -> Option<&mut SkillSlot> {
        self.skills.iter_mut().find(|slot| slot.id == *id)
    }

    pub fn has_skill(&self, id: &str) -> bool {
        self.skills.iter().any(|slot| slot.id == *id)
    }

    pub fn has_status(&self, kind: StatusKind) -> bool {
        self.statuses.iter().any(|status| status.kind == kind)
    }
}
