//! Content factory for loading a whole data directory.

use std::path::{Path, PathBuf};

use hunter_core::{EnemyTemplate, GameConfig, ItemDefinition, SkillDefinition};

use crate::catalog::ContentCatalog;
use crate::loaders::{ConfigLoader, EnemyLoader, ItemLoader, LoadResult, SkillLoader};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── items.ron
/// ├── skills.ron
/// ├── enemies.ron
/// └── scenarios/
///     └── mfu_eviction.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<Vec<ItemDefinition>> {
        ItemLoader::load(&self.data_dir.join("items.ron"))
    }

    /// Load skill catalog from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<Vec<SkillDefinition>> {
        SkillLoader::load(&self.data_dir.join("skills.ron"))
    }

    /// Load enemy templates from `enemies.ron`.
    pub fn load_enemies(&self) -> LoadResult<Vec<EnemyTemplate>> {
        EnemyLoader::load(&self.data_dir.join("enemies.ron"))
    }

    /// Load every content file into one catalog.
    pub fn load_catalog(&self) -> LoadResult<ContentCatalog> {
        let catalog = ContentCatalog {
            config: self.load_config()?,
            items: self.load_items()?,
            skills: self.load_skills()?,
            enemies: self.load_enemies()?,
        };
        tracing::info!(
            "Content loaded from {}: {} items, {} skills, {} enemy templates",
            self.data_dir.display(),
            catalog.items.len(),
            catalog.skills.len(),
            catalog.enemies.len()
        );
        Ok(catalog)
    }

    /// Path of `scenarios/{name}.ron`.
    pub fn scenario_path(&self, name: &str) -> PathBuf {
        self.data_dir.join("scenarios").join(format!("{}.ron", name))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
