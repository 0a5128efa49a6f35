//! Common error infrastructure for hunter-core.
//!
//! This module provides shared types and traits used across all error types in hunter-core.
//! Domain-specific errors (e.g., `CollectionError`, `ResourceError`) are defined in their
//! respective modules alongside the operations they guard.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each subsystem has its own error type with specific variants
//! - **Pure Failure**: Every error is returned before any state is touched, so a
//!   failed call is always a no-op and never emits an event
//! - **Severity Classification**: Errors are categorized for recovery strategies

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Errors are classified by their recoverability and expected handling:
/// - **Recoverable**: Conditions that may succeed later without changing the input
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Fatal**: Unrecoverable errors, typically bad configuration at startup
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ErrorSeverity {
    /// Recoverable error - can retry later or with an alternative action.
    ///
    /// Examples: not enough stock yet, item not picked up yet
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: duplicate id, zero amount, empty name
    Validation,

    /// Fatal error - the engine cannot be constructed or continue.
    ///
    /// Examples: zero capacity, resistance ceiling above 1
    Fatal,
}

impl ErrorSeverity {
    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if the engine cannot be built or continue.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Common trait for all hunter-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Rejected content definitions (items, skills, enemy templates).
///
/// Definitions are validated once, when the typed record is constructed, so
/// managers never see an empty id or a zero durability.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum DefinitionError {
    #[error("{kind} definition has an empty id")]
    EmptyId { kind: &'static str },

    #[error("{kind} '{id}' has an empty name")]
    EmptyName { kind: &'static str, id: String },

    #[error("item '{id}' has zero durability; omit it for an unbreakable item")]
    ZeroDurability { id: String },

    #[error("enemy template '{id}' has invalid max health {max_health}")]
    InvalidHealth { id: String, max_health: f64 },
}

impl GameError for DefinitionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyId { .. } => "DEFINITION_EMPTY_ID",
            Self::EmptyName { .. } => "DEFINITION_EMPTY_NAME",
            Self::ZeroDurability { .. } => "DEFINITION_ZERO_DURABILITY",
            Self::InvalidHealth { .. } => "DEFINITION_INVALID_HEALTH",
        }
    }
}

/// Shared id/name checks for definition constructors.
pub(crate) fn validate_identity(
    kind: &'static str,
    id: &str,
    name: &str,
) -> Result<(), DefinitionError> {
    if id.trim().is_empty() {
        return Err(DefinitionError::EmptyId { kind });
    }
    if name.trim().is_empty() {
        return Err(DefinitionError::EmptyName {
            kind,
            id: id.to_owned(),
        });
    }
    Ok(())
}
