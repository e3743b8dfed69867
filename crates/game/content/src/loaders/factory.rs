//! Content factory for loading a pack from a data directory.

use std::path::PathBuf;

use hexbound_core::{GameConfig, SkillBase};

use crate::ContentPack;
use crate::loaders::{Bestiary, BestiaryLoader, ConfigLoader, LoadResult, SkillLoader};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── skills.ron
/// └── bestiary.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load rule overrides from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load skill base variables from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<Vec<SkillBase>> {
        SkillLoader::load(&self.data_dir.join("skills.ron"))
    }

    /// Load actor templates from `bestiary.ron`.
    pub fn load_bestiary(&self) -> LoadResult<Bestiary> {
        BestiaryLoader::load(&self.data_dir.join("bestiary.ron"))
    }

    /// Load skills and templates and pair them into a pack.
    pub fn load_pack(&self) -> LoadResult<ContentPack> {
        ContentPack::new(self.load_skills()?, self.load_bestiary()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    #[test]
    fn shipped_data_directory_loads() {
        let factory = ContentFactory::new(data_dir());
        let pack = factory.load_pack().unwrap();
        assert!(pack.skill("DASH").is_some());
        assert!(pack.bestiary().get("brute").is_some());
        assert_eq!(factory.load_config().unwrap().final_floor, 5);
    }

    #[test]
    fn template_with_unknown_skill_fails_the_pack() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("skills.ron"), r#"[(id: "BASIC_MOVE", kind: movement)]"#)
            .unwrap();
        std::fs::write(
            dir.path().join("bestiary.ron"),
            r#"{"rat": (archetype: "Rat", faction: Enemy, hp: 1, skills: ["GNAW"])}"#,
        )
        .unwrap();

        let err = ContentFactory::new(dir.path()).load_pack().unwrap_err();
        assert!(err.to_string().contains("GNAW"));
    }
}
