//! Product catalog types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::record::{self, Record};

/// A catalog product.
///
/// `price` is in minor currency units. `stock` is never decremented below
/// zero; the inventory ledger enforces this at reservation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique, allocator-assigned identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Catalog category.
    pub category: String,
    /// Long description, display metadata only.
    #[serde(default)]
    pub description: String,
    /// Display emoji, opaque to the core.
    #[serde(default)]
    pub emoji: String,
    /// Unit price in minor currency units.
    pub price: i64,
    /// Units currently in stock.
    pub stock: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Client-supplied product fields, without an identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDraft {
    /// Display name.
    pub name: String,
    /// Catalog category.
    pub category: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Display emoji.
    #[serde(default)]
    pub emoji: String,
    /// Unit price in minor currency units.
    pub price: i64,
    /// Units in stock.
    pub stock: i64,
}

impl ProductDraft {
    /// Checks field-level invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] when the name is empty or price or
    /// stock are negative.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::Validation("product name must not be empty".into()));
        }
        if self.price < 0 {
            return Err(DomainError::Validation("price must not be negative".into()));
        }
        if self.stock < 0 {
            return Err(DomainError::Validation("stock must not be negative".into()));
        }
        Ok(())
    }
}

impl Product {
    /// Flattens the product into a stored record.
    #[must_use]
    pub fn to_record(&self) -> Record {
        Record::from([
            ("id".to_owned(), self.id.to_string()),
            ("name".to_owned(), self.name.clone()),
            ("category".to_owned(), self.category.clone()),
            ("description".to_owned(), self.description.clone()),
            ("emoji".to_owned(), self.emoji.clone()),
            ("price".to_owned(), self.price.to_string()),
            ("stock".to_owned(), self.stock.to_string()),
            ("created_at".to_owned(), self.created_at.to_rfc3339()),
            ("updated_at".to_owned(), self.updated_at.to_rfc3339()),
        ])
    }

    /// Reconstructs a product from a stored record.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] when required fields are absent or
    /// malformed.
    pub fn from_record(rec: &Record) -> Result<Self, DomainError> {
        Ok(Self {
            id: record::require_i64(rec, "id")?,
            name: record::require_str(rec, "name")?.to_owned(),
            category: record::str_or(rec, "category", "").to_owned(),
            description: record::str_or(rec, "description", "").to_owned(),
            emoji: record::str_or(rec, "emoji", "").to_owned(),
            price: record::require_i64(rec, "price")?,
            stock: record::require_i64(rec, "stock")?,
            created_at: record::require_datetime(rec, "created_at")?,
            updated_at: record::require_datetime(rec, "updated_at")?,
        })
    }
}
