//! Enemy template loader.

use std::path::Path;

use hunter_core::EnemyTemplate;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, ensure_unique_ids, read_file};

/// Enemy catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyCatalog {
    pub enemies: Vec<EnemyTemplate>,
}

/// Loader for enemy templates from RON files.
pub struct EnemyLoader;

impl EnemyLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<EnemyTemplate>> {
        let content = read_file(path)?;
        let catalog: EnemyCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy catalog RON: {}", e))?;

        for template in &catalog.enemies {
            template
                .validate()
                .map_err(|e| anyhow::anyhow!("Invalid enemy in {}: {}", path.display(), e))?;
        }
        ensure_unique_ids(path, catalog.enemies.iter().map(|enemy| enemy.kind.as_str()))?;

        tracing::debug!("Loaded {} enemy templates from {}", catalog.enemies.len(), path.display());
        Ok(catalog.enemies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_health() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("enemies.ron");
        std::fs::write(
            &path,
            r#"(enemies: [(kind: "ghost", name: "Ghost", max_health: -5.0)])"#,
        )
        .unwrap();

        let err = EnemyLoader::load(&path).unwrap_err().to_string();
        assert!(err.contains("ghost"));
    }
}
