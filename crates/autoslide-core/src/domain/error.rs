// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Scroll rejections are deliberately absent: they are recovered inside the
/// state machine and never leave it. What remains are construction-time
/// problems the host can actually fix.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("invalid carousel config: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("invalid tab route '{input}': {reason}")]
    InvalidTabRoute { input: String, reason: String },

    #[error("tab-strip key must not be empty")]
    EmptyStripKey,
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidConfig { field, .. } => vec![
                format!("Check the value of '{field}'"),
                "tick_interval must be non-zero and longer than settle_delay".into(),
            ],
            Self::InvalidTabRoute { .. } => vec![
                "Tab routes are written as ID=/route/prefix".into(),
                "Example: --tab deals=/deals".into(),
            ],
            Self::EmptyStripKey => vec!["Give every tab strip a stable, non-empty key".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidConfig { .. } => ErrorCategory::Configuration,
            Self::InvalidTabRoute { .. } | Self::EmptyStripKey => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
}
