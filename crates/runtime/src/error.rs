//! Unified error type surfaced by the runtime.
//!
//! Wraps engine rejections, configuration failures and scenario problems so
//! the binary can bubble them up with consistent context.
use std::path::PathBuf;

use hunter_core::{
    CollectionError, CombatError, ConfigError, DefinitionError, ErrorSeverity, GameError,
    ItemError, ResourceError,
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Collection(#[from] CollectionError),

    #[error(transparent)]
    Item(#[from] ItemError),

    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error(transparent)]
    Definition(#[from] DefinitionError),

    #[error("invalid game configuration")]
    Config(#[source] ConfigError),

    #[error("{kind} '{id}' is not defined in the content catalog")]
    UnknownContent { kind: &'static str, id: String },

    #[error("failed to load scenario {path}: {message}")]
    ScenarioLoad { path: PathBuf, message: String },

    #[error("scenario '{scenario}' step {step}: expected {expected:?}, found {actual:?}")]
    ExpectationFailed {
        scenario: String,
        step: usize,
        expected: Vec<String>,
        actual: Vec<String>,
    },
}

impl RuntimeError {
    /// True for engine refusals (duplicate id, unknown id, not enough stock,
    /// ...). These leave the session untouched; a host may simply move on.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::Collection(_)
                | Self::Item(_)
                | Self::Resource(_)
                | Self::Combat(CombatError::EnemyNotFound { .. })
        )
    }

    /// Severity of the underlying engine error, if any.
    pub fn severity(&self) -> Option<ErrorSeverity> {
        match self {
            Self::Collection(err) => Some(err.severity()),
            Self::Item(err) => Some(err.severity()),
            Self::Resource(err) => Some(err.severity()),
            Self::Combat(err) => Some(err.severity()),
            Self::Definition(err) => Some(err.severity()),
            Self::Config(err) => Some(err.severity()),
            _ => None,
        }
    }
}
