/// Game configuration constants and tunable rules.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Actor turns a single `run` call may process before it gives up.
    pub iteration_cap: u32,
    /// Extra cells a unit may slide across consecutive slippery tiles.
    pub max_slide_length: u32,
    /// Damage dealt to a unit that lands on a void tile.
    pub void_damage: u32,
    /// Damage dealt at the end of a turn spent on a burning tile.
    pub fire_damage: u32,
    pub message_log_capacity: usize,
    /// Reaching the stairs on this floor wins the run.
    pub final_floor: u32,
    /// Upgrades offered per shrine.
    pub shrine_options: usize,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Player + up to 63 enemies and companions.
    pub const MAX_ACTORS: usize = 64;
    /// A hex cell has six neighbours.
    pub const MAX_NEIGHBORS: usize = 6;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ITERATION_CAP: u32 = 512;
    pub const DEFAULT_MAX_SLIDE_LENGTH: u32 = 8;
    pub const DEFAULT_VOID_DAMAGE: u32 = 99;
    pub const DEFAULT_FIRE_DAMAGE: u32 = 1;
    pub const DEFAULT_MESSAGE_LOG_CAPACITY: usize = 50;
    pub const DEFAULT_FINAL_FLOOR: u32 = 5;
    pub const DEFAULT_SHRINE_OPTIONS: usize = 3;

    pub fn new() -> Self {
        Self {
            iteration_cap: Self::DEFAULT_ITERATION_CAP,
            max_slide_length: Self::DEFAULT_MAX_SLIDE_LENGTH,
            void_damage: Self::DEFAULT_VOID_DAMAGE,
            fire_damage: Self::DEFAULT_FIRE_DAMAGE,
            message_log_capacity: Self::DEFAULT_MESSAGE_LOG_CAPACITY,
            final_floor: Self::DEFAULT_FINAL_FLOOR,
            shrine_options: Self::DEFAULT_SHRINE_OPTIONS,
        }
    }

    pub fn with_iteration_cap(mut self, iteration_cap: u32) -> Self {
        self.iteration_cap = iteration_cap;
        self
    }

    pub fn with_final_floor(mut self, final_floor: u32) -> Self {
        self.final_floor = final_floor;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
