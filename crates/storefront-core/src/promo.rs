//! Promo code types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::record::{self, Record};

/// A limited-use promo code.
///
/// The redemption gate guarantees that no more than `uses` redemptions ever
/// succeed; `discount` is opaque to the core (percentage or fixed amount is
/// the caller's business).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromoCode {
    /// The code itself, unique key within the promo namespace.
    pub code: String,
    /// Discount value, opaque to the core.
    pub discount: i64,
    /// Maximum number of successful redemptions.
    pub uses: i64,
    /// Redemptions consumed so far.
    pub used: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Client-supplied promo fields.
#[derive(Debug, Clone, Deserialize)]
pub struct PromoDraft {
    /// The code to register.
    pub code: String,
    /// Discount value.
    pub discount: i64,
    /// Use limit.
    pub uses: i64,
}

impl PromoDraft {
    /// Checks field-level invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] when the code is empty, the
    /// discount is negative, or the use limit is not positive.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.code.trim().is_empty() {
            return Err(DomainError::Validation("promo code must not be empty".into()));
        }
        if self.discount < 0 {
            return Err(DomainError::Validation("discount must not be negative".into()));
        }
        if self.uses <= 0 {
            return Err(DomainError::Validation("use limit must be positive".into()));
        }
        Ok(())
    }
}

impl PromoCode {
    /// Flattens the promo into a stored record.
    #[must_use]
    pub fn to_record(&self) -> Record {
        Record::from([
            ("code".to_owned(), self.code.clone()),
            ("discount".to_owned(), self.discount.to_string()),
            ("uses".to_owned(), self.uses.to_string()),
            ("used".to_owned(), self.used.to_string()),
            ("created_at".to_owned(), self.created_at.to_rfc3339()),
            ("updated_at".to_owned(), self.updated_at.to_rfc3339()),
        ])
    }

    /// Reconstructs a promo from a stored record.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] when required fields are absent or
    /// malformed.
    pub fn from_record(rec: &Record) -> Result<Self, DomainError> {
        Ok(Self {
            code: record::require_str(rec, "code")?.to_owned(),
            discount: record::require_i64(rec, "discount")?,
            uses: record::require_i64(rec, "uses")?,
            used: record::i64_or(rec, "used", 0)?,
            created_at: record::require_datetime(rec, "created_at")?,
            updated_at: record::require_datetime(rec, "updated_at")?,
        })
    }
}
