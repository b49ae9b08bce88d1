//! Order types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::record::{self, Record};

/// Initial status of a freshly committed order.
pub const STATUS_PENDING: &str = "pending";

/// Status under which an order's total counts toward revenue.
pub const STATUS_COMPLETED: &str = "completed";

/// A single line of an order. Embedded in the order snapshot, not
/// independently addressable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    /// The product this line refers to. Wire name `id` for compatibility
    /// with the storefront client.
    #[serde(rename = "id")]
    pub product_id: i64,
    /// Units ordered. Positive at order-creation time.
    pub quantity: i64,
}

/// An immutable order snapshot.
///
/// Items and total are frozen at commit time; later catalog changes never
/// alter a past order. Only `status` and `updated_at` are mutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique, allocator-assigned identifier, strictly increasing in
    /// creation order.
    pub id: i64,
    /// The ordering user.
    #[serde(rename = "userId")]
    pub user_id: i64,
    /// Frozen line items.
    pub items: Vec<OrderItem>,
    /// Total in minor currency units, recomputed server-side at commit.
    pub total: i64,
    /// Workflow status. Transitions are externally driven and not validated
    /// beyond persistence.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Client-supplied order request. Any client-supplied total is ignored; the
/// engine recomputes it from live catalog prices.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderDraft {
    /// The ordering user.
    #[serde(rename = "userId")]
    pub user_id: i64,
    /// Requested line items.
    pub items: Vec<OrderItem>,
}

impl OrderDraft {
    /// Checks field-level invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] when the order has no items or a
    /// line has a non-positive quantity.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.items.is_empty() {
            return Err(DomainError::Validation("order must contain at least one item".into()));
        }
        for item in &self.items {
            if item.quantity <= 0 {
                return Err(DomainError::Validation(format!(
                    "quantity for product {} must be positive",
                    item.product_id
                )));
            }
        }
        Ok(())
    }
}

impl Order {
    /// Flattens the order into a stored record. Items are embedded as a
    /// serialized JSON value within the record.
    #[must_use]
    pub fn to_record(&self) -> Record {
        let items = serde_json::to_string(&self.items).unwrap_or_else(|_| "[]".to_owned());
        Record::from([
            ("id".to_owned(), self.id.to_string()),
            ("userId".to_owned(), self.user_id.to_string()),
            ("items".to_owned(), items),
            ("total".to_owned(), self.total.to_string()),
            ("status".to_owned(), self.status.clone()),
            ("created_at".to_owned(), self.created_at.to_rfc3339()),
            ("updated_at".to_owned(), self.updated_at.to_rfc3339()),
        ])
    }

    /// Reconstructs an order from a stored record.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] when required fields are absent or
    /// malformed.
    pub fn from_record(rec: &Record) -> Result<Self, DomainError> {
        let items: Vec<OrderItem> = serde_json::from_str(record::str_or(rec, "items", "[]"))
            .map_err(|e| DomainError::Validation(format!("malformed order items: {e}")))?;
        Ok(Self {
            id: record::require_i64(rec, "id")?,
            user_id: record::require_i64(rec, "userId")?,
            items,
            total: record::require_i64(rec, "total")?,
            status: record::str_or(rec, "status", STATUS_PENDING).to_owned(),
            created_at: record::require_datetime(rec, "created_at")?,
            updated_at: record::require_datetime(rec, "updated_at")?,
        })
    }
}
