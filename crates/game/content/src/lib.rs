//! Data-driven content definitions and loaders.
//!
//! This crate turns the files under a data directory into typed hunter-core
//! definitions:
//! - Game configuration (TOML)
//! - Item catalogs (RON)
//! - Skill catalogs (RON)
//! - Enemy templates (RON)
//!
//! Content is looked up by id when the host spawns or picks something up; the
//! engine itself never reads files.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::ContentCatalog;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, EnemyLoader, ItemLoader, SkillLoader};
