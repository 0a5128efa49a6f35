//! Content loaders for reading game data from files.
//!
//! Every loader parses one file into hunter-core definitions. Parse errors and
//! rejected definitions are reported with the offending path.

pub mod config;
pub mod enemy;
pub mod factory;
pub mod item;
pub mod skill;

pub use config::ConfigLoader;
pub use enemy::{EnemyCatalog, EnemyLoader};
pub use factory::ContentFactory;
pub use item::{ItemCatalog, ItemLoader};
pub use skill::{SkillCatalog, SkillLoader};

use std::collections::HashSet;
use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Rejects catalogs that define the same id twice.
pub(crate) fn ensure_unique_ids<'a>(
    path: &Path,
    ids: impl IntoIterator<Item = &'a str>,
) -> LoadResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            anyhow::bail!("Duplicate id '{}' in {}", id, path.display());
        }
    }
    Ok(())
}
