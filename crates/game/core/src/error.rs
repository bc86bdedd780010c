//! Common error infrastructure for arena-core.
//!
//! Domain-specific errors (`StatsError`, `ActionError`, `ExecuteError`) live
//! next to the code that produces them. This module only provides the shared
//! classification used by the runtime to decide between rejecting a request,
//! retrying, or aborting a battle.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the player can try a different action in the same turn
/// - **Validation**: malformed input that should not be resubmitted unchanged
/// - **Internal**: unexpected state inconsistency
/// - **Fatal**: the battle cannot continue (e.g. missing catalog data)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable | Self::Validation)
    }

    /// Returns true if this error should abort the battle.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Common trait for all arena-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Error codes are stable strings surfaced to clients
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
