//! Aggregate statistics types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::record::{self, Record};

/// Derived, non-authoritative summary of the ledger.
///
/// Always reproducible by a full recompute; never a source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateStats {
    /// Number of orders in the ledger.
    pub total_orders: i64,
    /// Number of catalog products.
    pub total_products: i64,
    /// Number of users.
    pub total_users: i64,
    /// Sum of totals over completed orders, in minor currency units.
    pub total_revenue: i64,
    /// When this snapshot was computed.
    pub updated_at: DateTime<Utc>,
}

impl AggregateStats {
    /// Flattens the stats into a stored record.
    #[must_use]
    pub fn to_record(&self) -> Record {
        Record::from([
            ("total_orders".to_owned(), self.total_orders.to_string()),
            ("total_products".to_owned(), self.total_products.to_string()),
            ("total_users".to_owned(), self.total_users.to_string()),
            ("total_revenue".to_owned(), self.total_revenue.to_string()),
            ("updated_at".to_owned(), self.updated_at.to_rfc3339()),
        ])
    }

    /// Reconstructs stats from a stored record.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] when fields are absent or
    /// malformed.
    pub fn from_record(rec: &Record) -> Result<Self, DomainError> {
        Ok(Self {
            total_orders: record::i64_or(rec, "total_orders", 0)?,
            total_products: record::i64_or(rec, "total_products", 0)?,
            total_users: record::i64_or(rec, "total_users", 0)?,
            total_revenue: record::i64_or(rec, "total_revenue", 0)?,
            updated_at: record::require_datetime(rec, "updated_at")?,
        })
    }
}
