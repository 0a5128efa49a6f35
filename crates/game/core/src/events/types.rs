//! Closed set of events published by the managers.

use crate::collection::Entry;
use crate::combat::{AttackStat, AttackType, Enemy, EnemyId};
use crate::inventory::Item;
use crate::resources::ResourceRecord;
use crate::skills::Skill;

/// Event kinds used for routing subscriptions.
///
/// String forms (`item_added`, `skill_forgotten`, ...) are used in logs and
/// scenario files.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EventKind {
    ItemAdded,
    ItemRemoved,
    ItemUsed,
    SkillLearned,
    SkillForgotten,
    SkillUsed,
    ResourceAdded,
    ResourceUsed,
    ResourceDepleted,
    AttackRegistered,
    ResistanceAdapted,
    EnemySpawned,
    EnemyDamaged,
    EnemyDefeated,
}

/// Events emitted synchronously by the managers after a mutation completes.
#[derive(Clone, Debug)]
pub enum GameEvent {
    /// An item entered the inventory.
    ItemAdded(Entry<Item>),
    /// An item was evicted to make room (MFU).
    ItemRemoved(Entry<Item>),
    /// An item's use counter was incremented.
    ItemUsed(Entry<Item>),

    SkillLearned(Entry<Skill>),
    /// A skill was forgotten to make room (MFU).
    SkillForgotten(Entry<Skill>),
    SkillUsed {
        skill: Entry<Skill>,
        effectiveness: f64,
    },

    /// A new resource record was created. Merges into an existing record are silent.
    ResourceAdded(ResourceRecord),
    ResourceUsed {
        record: ResourceRecord,
        amount: u32,
    },
    /// The last unit was consumed; the record no longer exists in the store.
    ResourceDepleted(ResourceRecord),

    AttackRegistered {
        attack: AttackType,
        stat: AttackStat,
        most_frequent: Option<AttackType>,
    },
    ResistanceAdapted {
        enemy: EnemyId,
        attack: AttackType,
        resistance: f64,
    },
    EnemySpawned(Enemy),
    EnemyDamaged {
        enemy: EnemyId,
        attack: AttackType,
        damage: f64,
        health: f64,
    },
    /// Health reached zero; the enemy has been removed from the registry.
    EnemyDefeated(Enemy),
}

impl GameEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::ItemAdded(_) => EventKind::ItemAdded,
            GameEvent::ItemRemoved(_) => EventKind::ItemRemoved,
            GameEvent::ItemUsed(_) => EventKind::ItemUsed,
            GameEvent::SkillLearned(_) => EventKind::SkillLearned,
            GameEvent::SkillForgotten(_) => EventKind::SkillForgotten,
            GameEvent::SkillUsed { .. } => EventKind::SkillUsed,
            GameEvent::ResourceAdded(_) => EventKind::ResourceAdded,
            GameEvent::ResourceUsed { .. } => EventKind::ResourceUsed,
            GameEvent::ResourceDepleted(_) => EventKind::ResourceDepleted,
            GameEvent::AttackRegistered { .. } => EventKind::AttackRegistered,
            GameEvent::ResistanceAdapted { .. } => EventKind::ResistanceAdapted,
            GameEvent::EnemySpawned(_) => EventKind::EnemySpawned,
            GameEvent::EnemyDamaged { .. } => EventKind::EnemyDamaged,
            GameEvent::EnemyDefeated(_) => EventKind::EnemyDefeated,
        }
    }
}
