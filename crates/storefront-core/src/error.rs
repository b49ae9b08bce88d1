//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
///
/// Every fallible operation in the ledger returns one of these variants so
/// callers can decide per-call whether to degrade gracefully (non-critical
/// reads) or hard-fail (writes). Infrastructure failures on write paths are
/// never swallowed.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The record store is unreachable or a call timed out.
    #[error("record store unavailable: {0}")]
    StoreUnavailable(String),

    /// Malformed input or a corrupt stored record.
    #[error("validation error: {0}")]
    Validation(String),

    /// No record exists for the given entity and key.
    #[error("{entity} not found: {key}")]
    NotFound {
        /// Entity kind, e.g. `"product"`.
        entity: &'static str,
        /// The key or identifier that failed to resolve.
        key: String,
    },

    /// An order line requested more units than the product has in stock.
    #[error(
        "insufficient stock for product {product_id}: requested {requested}, available {available}"
    )]
    InsufficientStock {
        /// The product whose stock was exhausted.
        product_id: i64,
        /// Units requested by the order line.
        requested: i64,
        /// Units actually available at reservation time.
        available: i64,
    },

    /// A promo code's use limit has been exhausted.
    #[error("promo code {code} has reached its use limit")]
    LimitReached {
        /// The exhausted promo code.
        code: String,
    },

    /// A concurrent mutation was detected by an optimistic check.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    /// Shorthand for a [`DomainError::NotFound`] with a displayable key.
    #[must_use]
    pub fn not_found(entity: &'static str, key: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}
