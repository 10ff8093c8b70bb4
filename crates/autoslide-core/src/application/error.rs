//! Application layer errors.
//!
//! These errors represent failures in adapters and orchestration, not
//! carousel rules. Rule violations are `DomainError` from `crate::domain`.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while driving ports.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Offset store access failed (lock poisoned, etc.).
    #[error("Offset store error")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::StoreLockError => vec![
                "A previous holder panicked while holding the lock".into(),
                "Recreate the store; its contents are no longer trustworthy".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
