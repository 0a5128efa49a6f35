//! Skill catalog loader.

use std::path::Path;

use hunter_core::{Skill, SkillDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, ensure_unique_ids, read_file};

/// Skill catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<SkillDefinition>,
}

/// Loader for skill catalog from RON files.
pub struct SkillLoader;

impl SkillLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<SkillDefinition>> {
        let content = read_file(path)?;
        let catalog: SkillCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;

        for definition in &catalog.skills {
            Skill::new(definition.clone())
                .map_err(|e| anyhow::anyhow!("Invalid skill in {}: {}", path.display(), e))?;
        }
        ensure_unique_ids(path, catalog.skills.iter().map(|skill| skill.id.as_str()))?;

        tracing::debug!("Loaded {} skills from {}", catalog.skills.len(), path.display());
        Ok(catalog.skills)
    }
}
