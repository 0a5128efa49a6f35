//! Frequency-biased resource-lifecycle engine.
//!
//! `hunter-core` owns the rules: capacity-bounded collections that evict their
//! *most* frequently used entry, the inventory and skill memory built on them,
//! usage-driven resource depletion, and enemies that adapt to the player's
//! favourite attack. Every manager announces its changes on a shared
//! [`EventBus`]; hosts drive the engine through plain method calls.
//!
//! Execution is single-threaded and run-to-completion. Listeners are invoked
//! synchronously and may call back into the manager that emitted.
pub mod collection;
pub mod combat;
pub mod config;
pub mod error;
pub mod events;
pub mod inventory;
pub mod resources;
pub mod skills;

pub use collection::{
    Admission, CollectionError, Entry, FrequencyBoundedCollection, most_frequent_index,
};
pub use combat::{
    AdaptiveResistanceTracker, AttackStat, AttackType, CombatError, CombatManager, DamageOutcome,
    Enemy, EnemyId, EnemyRegistry, EnemyTemplate, ResistanceReport,
};
pub use config::{ConfigError, GameConfig};
pub use error::{DefinitionError, ErrorSeverity, GameError};
pub use events::{EventBus, EventKind, GameEvent, Subscription, SubscriptionId};
pub use inventory::{InventoryManager, Item, ItemDefinition, ItemError};
pub use resources::{Consumption, ResourceError, ResourceRecord, ResourceStore};
pub use skills::{Skill, SkillContext, SkillDefinition, SkillEffect, SkillManager};
