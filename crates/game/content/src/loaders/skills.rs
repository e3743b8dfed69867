//! Skill base variable loader.

use std::path::Path;

use hexbound_core::{SkillBase, SkillKind};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// One entry of `skills.ron`. Omitted fields take the defaults of
/// [`SkillBase::new`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SkillVars {
    pub id: String,
    pub name: Option<String>,
    pub kind: SkillKind,
    pub cooldown: u32,
    pub range: u32,
    pub damage: u32,
    pub momentum: u32,
    pub passive: bool,
    pub telegraphed: bool,
    pub needs_target: bool,
    pub upgrades: Vec<String>,
}

impl Default for SkillVars {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: None,
            kind: SkillKind::default(),
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

impl From<SkillVars> for SkillBase {
    fn from(vars: SkillVars) -> Self {
        let mut base = SkillBase::new(vars.id, vars.kind);
        if let Some(name) = vars.name {
            base.name = name;
        }
        base.cooldown = vars.cooldown;
        base.range = vars.range;
        base.damage = vars.damage;
        base.momentum = vars.momentum;
        base.passive = vars.passive;
        base.telegraphed = vars.telegraphed;
        base.needs_target = vars.needs_target;
        base.upgrades = vars.upgrades;
        base
    }
}

/// Loader for skill base variables from RON files.
pub struct SkillLoader;

impl SkillLoader {
    /// Load skill bases from a RON file.
    ///
    /// RON format: `Vec<SkillVars>`
    pub fn load(path: &Path) -> LoadResult<Vec<SkillBase>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse skill bases from RON text. Ids must be non-empty and unique.
    pub fn parse(content: &str) -> LoadResult<Vec<SkillBase>> {
        let vars: Vec<SkillVars> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skills RON: {}", e))?;

        let mut bases: Vec<SkillBase> = Vec::with_capacity(vars.len());
        for entry in vars {
            if entry.id.is_empty() {
                anyhow::bail!("Skill entry without an id");
            }
            if bases.iter().any(|base| base.id.as_str() == entry.id) {
                anyhow::bail!("Duplicate skill id {}", entry.id);
            }
            bases.push(entry.into());
        }
        Ok(bases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_fields_take_defaults() {
        let bases = SkillLoader::parse(r#"[(id: "POKE", damage: 2)]"#).unwrap();
        assert_eq!(bases.len(), 1);
        let poke = &bases[0];
        assert_eq!(poke.name, "POKE");
        assert_eq!(poke.kind, SkillKind::Attack);
        assert_eq!(poke.range, 1);
        assert_eq!(poke.damage, 2);
        assert!(poke.needs_target);
        assert!(!poke.telegraphed);
    }

    #[test]
    fn kind_uses_snake_case_names() {
        let bases =
            SkillLoader::parse(r#"[(id: "HOP", kind: movement, range: 2, upgrades: ["FAR"])]"#)
                .unwrap();
        assert_eq!(bases[0].kind, SkillKind::Movement);
        assert_eq!(bases[0].upgrades, vec!["FAR".to_owned()]);
    }

    #[test]
    fn duplicate_and_missing_ids_are_rejected() {
        assert!(SkillLoader::parse(r#"[(id: "A"), (id: "A")]"#).is_err());
        assert!(SkillLoader::parse(r#"[(damage: 1)]"#).is_err());
        assert!(SkillLoader::parse("not ron").is_err());
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skills.ron");
        std::fs::write(&path, r#"[(id: "WAVE", kind: utility, needs_target: false)]"#).unwrap();

        let bases = SkillLoader::load(&path).unwrap();
        assert_eq!(bases[0].kind, SkillKind::Utility);
        assert!(!bases[0].needs_target);
        assert!(SkillLoader::load(&dir.path().join("missing.ron")).is_err());
    }
}
