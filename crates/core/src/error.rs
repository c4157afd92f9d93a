//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic failures of the command pipeline
/// (grammar, lookup, stock invariants). Infrastructure concerns such as
/// storage failures belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Free text did not match the command grammar.
    #[error("invalid command format: {0}")]
    Parse(String),

    /// A resource name failed lookup in the catalog.
    #[error("resource '{0}' not found")]
    NotFound(String),

    /// A USE would drive the stored quantity negative.
    #[error("not enough '{resource}' in stock (have {available}, requested {requested})")]
    InsufficientStock {
        resource: String,
        available: u64,
        requested: u64,
    },

    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    pub fn insufficient_stock(resource: impl Into<String>, available: u64, requested: u64) -> Self {
        Self::InsufficientStock {
            resource: resource.into(),
            available,
            requested,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }
}
