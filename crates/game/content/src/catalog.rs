//! In-memory content catalog resolved by id.

use hunter_core::{
    DefinitionError, EnemyTemplate, GameConfig, Item, ItemDefinition, Skill, SkillDefinition,
};

/// Everything loaded from a data directory.
#[derive(Clone, Debug, Default)]
pub struct ContentCatalog {
    pub config: GameConfig,
    pub items: Vec<ItemDefinition>,
    pub skills: Vec<SkillDefinition>,
    pub enemies: Vec<EnemyTemplate>,
}

impl ContentCatalog {
    pub fn item_definition(&self, id: &str) -> Option<&ItemDefinition> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn skill_definition(&self, id: &str) -> Option<&SkillDefinition> {
        self.skills.iter().find(|skill| skill.id == id)
    }

    pub fn enemy_template(&self, kind: &str) -> Option<&EnemyTemplate> {
        self.enemies.iter().find(|enemy| enemy.kind == kind)
    }

    /// Builds a fresh item from its definition.
    pub fn item(&self, id: &str) -> Option<Result<Item, DefinitionError>> {
        self.item_definition(id).cloned().map(Item::new)
    }

    /// Builds a fresh, unpracticed skill from its definition.
    pub fn skill(&self, id: &str) -> Option<Result<Skill, DefinitionError>> {
        self.skill_definition(id).cloned().map(Skill::new)
    }
}
