//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is raised before the aggregate is touched, so a failed call
/// leaves state exactly as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An argument value failed validation (blank name, out-of-range value, ...).
    #[error("{0}")]
    Validation(String),

    /// A required argument was absent.
    #[error("{reason}")]
    InvalidArgument { field: &'static str, reason: String },

    /// The operation is not allowed in the aggregate's current state.
    #[error("{0}")]
    IllegalState(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A conflict occurred (e.g. stale version / optimistic concurrency).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// A required argument named `field` was not supplied.
    ///
    /// The reason reads `"<Field> cannot be null"`, e.g. `"Location cannot be null"`.
    pub fn missing(field: &'static str) -> Self {
        let mut chars = field.chars();
        let reason = match chars.next() {
            Some(first) => format!("{}{} cannot be null", first.to_uppercase(), chars.as_str()),
            None => "argument cannot be null".to_string(),
        };
        Self::InvalidArgument { field, reason }
    }

    pub fn illegal_state(msg: impl Into<String>) -> Self {
        Self::IllegalState(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}
