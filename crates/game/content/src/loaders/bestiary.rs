//! Actor template loader.

use std::collections::BTreeMap;
use std::path::Path;

use hexbound_core::state::{Faction, WeightClass};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// Static description of an actor kind. Skills are listed by id; their
/// cooldowns come from the skill base variables at instantiation time.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ActorTemplate {
    pub archetype: String,
    pub faction: Faction,
    pub hp: u32,
    #[serde(default = "ActorTemplate::default_speed")]
    pub speed: i32,
    #[serde(default)]
    pub weight: WeightClass,
    #[serde(default)]
    pub armor: u32,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl ActorTemplate {
    fn default_speed() -> i32 {
        10
    }
}

/// Named actor templates, ordered by name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bestiary {
    templates: BTreeMap<String, ActorTemplate>,
}

impl Bestiary {
    pub const PLAYER: &'static str = "player";

    pub fn get(&self, name: &str) -> Option<&ActorTemplate> {
        self.templates.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ActorTemplate)> {
        self.templates.iter().map(|(name, template)| (name.as_str(), template))
    }

    /// Names of the enemy templates, in name order.
    pub fn enemy_names(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, template)| template.faction == Faction::Enemy)
            .map(|(name, _)| name)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl FromIterator<(String, ActorTemplate)> for Bestiary {
    fn from_iter<T: IntoIterator<Item = (String, ActorTemplate)>>(iter: T) -> Self {
        Self {
            templates: iter.into_iter().collect(),
        }
    }
}

/// Loader for actor templates from RON files.
pub struct BestiaryLoader;

impl BestiaryLoader {
    /// Load templates from a RON file.
    ///
    /// RON format: `{ "name": ActorTemplate, ... }`
    pub fn load(path: &Path) -> LoadResult<Bestiary> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Bestiary> {
        let templates: BTreeMap<String, ActorTemplate> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse bestiary RON: {}", e))?;
        if let Some((name, _)) = templates.iter().find(|(_, template)| template.hp == 0) {
            anyhow::bail!("Template {} has no hp", name);
        }
        Ok(Bestiary { templates })
    }
}
