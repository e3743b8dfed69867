//! Runtime configuration read from the environment.
use std::env;
use std::str::FromStr;

use hexbound_core::GameConfig;

/// Settings for one session.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Seed of the run RNG.
    pub seed: String,
    pub game_config: GameConfig,
    /// How many states `Session::undo` can step back through.
    pub undo_depth: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            seed: Self::DEFAULT_SEED.to_owned(),
            game_config: GameConfig::default(),
            undo_depth: Self::DEFAULT_UNDO_DEPTH,
        }
    }
}

impl RuntimeConfig {
    pub const DEFAULT_SEED: &'static str = "hexbound";
    pub const DEFAULT_UNDO_DEPTH: usize = 32;

    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `HEXBOUND_SEED` - run seed (default: `hexbound`)
    /// - `HEXBOUND_ITERATION_CAP` - turn loop iteration cap, at least 1
    /// - `HEXBOUND_UNDO_DEPTH` - undo history length
    /// - `HEXBOUND_FINAL_FLOOR` - floor whose stairs win the run, at least 1
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary key lookup.
    /// Unparsable values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(seed) = read_env::<String>(&lookup, "HEXBOUND_SEED") {
            config.seed = seed;
        }
        if let Some(cap) = read_env::<u32>(&lookup, "HEXBOUND_ITERATION_CAP") {
            config.game_config.iteration_cap = cap.max(1);
        }
        if let Some(depth) = read_env::<usize>(&lookup, "HEXBOUND_UNDO_DEPTH") {
            config.undo_depth = depth;
        }
        if let Some(floor) = read_env::<u32>(&lookup, "HEXBOUND_FINAL_FLOOR") {
            config.game_config.final_floor = floor.max(1);
        }

        config
    }

    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = seed.into();
        self
    }

    pub fn with_game_config(mut self, game_config: GameConfig) -> Self {
        self.game_config = game_config;
        self
    }
}

fn read_env<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: FromStr,
{
    lookup(key)?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> RuntimeConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RuntimeConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.seed, RuntimeConfig::DEFAULT_SEED);
        assert_eq!(config.undo_depth, RuntimeConfig::DEFAULT_UNDO_DEPTH);
        assert_eq!(config.game_config, GameConfig::default());
    }

    #[test]
    fn variables_override_defaults() {
        let config = config_from(&[
            ("HEXBOUND_SEED", "daily-42"),
            ("HEXBOUND_ITERATION_CAP", "64"),
            ("HEXBOUND_UNDO_DEPTH", " 4 "),
            ("HEXBOUND_FINAL_FLOOR", "0"),
        ]);
        assert_eq!(config.seed, "daily-42");
        assert_eq!(config.game_config.iteration_cap, 64);
        assert_eq!(config.undo_depth, 4);
        assert_eq!(config.game_config.final_floor, 1);
    }

    #[test]
    fn garbage_values_are_ignored() {
        let config = config_from(&[("HEXBOUND_ITERATION_CAP", "many")]);
        assert_eq!(
            config.game_config.iteration_cap,
            GameConfig::DEFAULT_ITERATION_CAP
        );
    }
}
