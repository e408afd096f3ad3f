//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures. Storage and
/// transport failures belong to the layers that own them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed or missing input.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The referenced product does not exist.
    #[error("not found")]
    NotFound,

    /// A sale asked for more units than are on hand.
    #[error("insufficient stock for sale (requested {requested}, available {available})")]
    InsufficientStock { requested: i64, available: i64 },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn insufficient_stock(requested: i64, available: i64) -> Self {
        Self::InsufficientStock {
            requested,
            available,
        }
    }
}
