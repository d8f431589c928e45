//! Common error infrastructure for storage-core.
//!
//! This module provides shared types and traits used across all error types in the crate.
//! Domain-specific errors (e.g., `StorageError`, `WorldError`) are defined in their
//! respective modules alongside the operations that raise them.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each layer has its own error type with specific variants
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **Never Fatal**: No failure in this crate should take the process down; the
//!   worst outcome is that a feature skips a container for the current tick

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Errors are classified by their recoverability and expected handling:
/// - **Recoverable**: Temporary conditions that may succeed on a later tick
/// - **Validation**: The referenced entity or input is unusable; drop it, never retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - defer and retry later.
    ///
    /// Examples: exclusive-access token held by another player
    Recoverable,

    /// Validation error - stop considering the target.
    ///
    /// Examples: stale container reference, unknown entity id
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: nested storage without a resolvable placement, missing oracle
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

    /// Returns true if retrying on a later tick may succeed.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all storage-core errors.
///
/// This trait provides a uniform interface for error classification across all
/// error types in the crate.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait StorageFault: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// This is useful for error categorization, log fields, and testing.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_recoverable_severity_allows_retry() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(!ErrorSeverity::Internal.is_recoverable());
        assert!(ErrorSeverity::Internal.is_internal());
        assert_eq!(ErrorSeverity::Validation.as_str(), "validation");
    }
}
