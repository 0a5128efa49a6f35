//! Item catalog loader.

use std::path::Path;

use hunter_core::{Item, ItemDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, ensure_unique_ids, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemDefinition>,
}

/// Loader for item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item catalog from a RON file.
    ///
    /// Every definition is validated; one bad entry rejects the whole file.
    pub fn load(path: &Path) -> LoadResult<Vec<ItemDefinition>> {
        let content = read_file(path)?;
        let catalog: ItemCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        for definition in &catalog.items {
            Item::new(definition.clone())
                .map_err(|e| anyhow::anyhow!("Invalid item in {}: {}", path.display(), e))?;
        }
        ensure_unique_ids(path, catalog.items.iter().map(|item| item.id.as_str()))?;

        tracing::debug!("Loaded {} items from {}", catalog.items.len(), path.display());
        Ok(catalog.items)
    }
}
