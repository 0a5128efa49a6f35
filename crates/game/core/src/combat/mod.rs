//! Enemy adaptation and damage resolution.
//!
//! The player's most frequent attack type becomes a permanent countermeasure:
//! each registered attack recomputes the MFU attack and raises every live
//! enemy's resistance to it, up to a ceiling.
//!
//! # Layout
//!
//! - [`enemy`]: identifiers, templates, enemy records and the registry
//! - [`adaptation`]: attack histogram and resistance feedback
//! - [`damage`]: pure damage resolution against resistances
//! - [`CombatManager`]: event-emitting facade over all of the above

pub mod adaptation;
pub mod damage;
pub mod enemy;
mod manager;

pub use adaptation::{Adaptation, AdaptiveResistanceTracker, AttackStat};
pub use damage::{DamageOutcome, resolve_damage};
pub use enemy::{AttackType, Enemy, EnemyId, EnemyRegistry, EnemyTemplate, ResistanceReport};
pub use manager::CombatManager;

use crate::error::{DefinitionError, ErrorSeverity, GameError};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CombatError {
    #[error("{id} not found")]
    EnemyNotFound { id: EnemyId },

    #[error("damage must be finite and non-negative, got {damage}")]
    InvalidDamage { damage: f64 },

    #[error(transparent)]
    Definition(#[from] DefinitionError),
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EnemyNotFound { .. } => ErrorSeverity::Recoverable,
            Self::InvalidDamage { .. } | Self::Definition(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EnemyNotFound { .. } => "COMBAT_ENEMY_NOT_FOUND",
            Self::InvalidDamage { .. } => "COMBAT_INVALID_DAMAGE",
            Self::Definition(err) => err.error_code(),
        }
    }
}
