//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (e.g. `BattleError`, `WorldError`) live next to the
//! rules they guard. This module only provides the shared classification used
//! by callers to decide whether to retry, reject input, or end a session.
//!
//! Nothing in game-core is fatal to the process: every failure is returned as
//! a value and the caller decides what to do with it.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the same request may succeed later or with other input
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistency that needs investigation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with same or alternative input.
    ///
    /// Examples: not enough currency, destination outside the city
    Recoverable,

    /// Validation error - invalid request, should not retry without changes.
    ///
    /// Examples: a character battling itself, resolving a finished battle
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: decimal overflow while granting a reward
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all game-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Error codes are stable SCREAMING_SNAKE identifiers usable in logs and tests
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str;
}
