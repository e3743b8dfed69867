//! Game configuration loader.

use std::path::Path;

use hexbound_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for rule configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Omitted keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        if config.iteration_cap == 0 {
            anyhow::bail!("iteration_cap must be positive");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("final_floor = 3\n").unwrap();
        assert_eq!(config.final_floor, 3);
        assert_eq!(config.iteration_cap, GameConfig::DEFAULT_ITERATION_CAP);
        assert_eq!(config.void_damage, GameConfig::DEFAULT_VOID_DAMAGE);
    }

    #[test]
    fn zero_iteration_cap_is_rejected() {
        assert!(ConfigLoader::parse("iteration_cap = 0").is_err());
        assert!(ConfigLoader::parse("iteration_cap = \"lots\"").is_err());
    }
}
