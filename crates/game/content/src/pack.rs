//! Skill registry and actor templates bundled as one unit of content.

use hexbound_core::state::{Actor, ActorId, Point, SkillId, SkillSlot};
use hexbound_core::{SkillBase, SkillBook, SkillDefinition, SkillRegistry};

use crate::loaders::{ActorTemplate, Bestiary, BestiaryLoader, LoadResult, SkillLoader};
use crate::skills::build_skill_book;

const STANDARD_SKILLS: &str = include_str!("../data/skills.ron");
const STANDARD_BESTIARY: &str = include_str!("../data/bestiary.ron");

/// A skill registry plus the templates that reference it. Every skill a
/// template lists is guaranteed to be registered.
#[derive(Debug)]
pub struct ContentPack {
    skills: SkillBook,
    bestiary: Bestiary,
}

impl ContentPack {
    /// Pairs skill bases with their behaviour and checks the templates.
    pub fn new(bases: Vec<SkillBase>, bestiary: Bestiary) -> LoadResult<Self> {
        let skills = build_skill_book(bases)?;
        for (name, template) in bestiary.iter() {
            if let Some(missing) = template
                .skills
                .iter()
                .find(|id| skills.skill(&SkillId::new(id.as_str())).is_none())
            {
                anyhow::bail!("Template {} lists unknown skill {}", name, missing);
            }
        }
        Ok(Self { skills, bestiary })
    }

    /// The content shipped in `data/`, embedded at compile time.
    pub fn standard() -> LoadResult<Self> {
        Self::new(
            SkillLoader::parse(STANDARD_SKILLS)?,
            BestiaryLoader::parse(STANDARD_BESTIARY)?,
        )
    }

    pub fn skills(&self) -> &SkillBook {
        &self.skills
    }

    pub fn skill(&self, id: &str) -> Option<&dyn SkillDefinition> {
        self.skills.skill(&SkillId::new(id))
    }

    pub fn bestiary(&self) -> &Bestiary {
        &self.bestiary
    }

    pub fn template(&self, name: &str) -> LoadResult<&ActorTemplate> {
        self.bestiary
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown actor template {}", name))
    }

    /// Builds an actor from a template. The id is a placeholder: spawning
    /// assigns the real one.
    pub fn instantiate(&self, name: &str, position: Point) -> LoadResult<Actor> {
        let template = self.template(name)?;
        let mut actor = Actor::new(ActorId::PLAYER, &template.archetype, template.faction, position)
            .with_hp(template.hp)
            .with_speed(template.speed)
            .with_weight(template.weight)
            .with_armor(template.armor);
        for id in &template.skills {
            let cooldown = self
                .skills
                .base(&SkillId::new(id.as_str()))
                .map_or(0, |base| base.cooldown);
            actor = actor.with_skill(SkillSlot::new(id.as_str(), cooldown));
        }
        Ok(actor)
    }
}
