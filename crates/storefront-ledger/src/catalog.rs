//! Product catalog and inventory ledger.
//!
//! Catalog CRUD has no invariants beyond overwrite-the-record. The one
//! operation with teeth is [`Catalog::decrement_stock`]: a conditional
//! decrement that rejects over-quantity requests outright rather than
//! clamping, so stock never commits below zero.

use std::sync::Arc;

use storefront_core::clock::Clock;
use storefront_core::error::DomainError;
use storefront_core::keys::{self, Namespace};
use storefront_core::product::{Product, ProductDraft};
use storefront_core::store::RecordStore;
use tracing::warn;

use crate::ids;

/// Repository over the product namespace.
#[derive(Clone)]
pub struct Catalog {
    store: Arc<dyn RecordStore>,
}

impl Catalog {
    /// Creates a catalog over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Returns all products, sorted by id. Malformed records are skipped
    /// with a warning rather than failing the whole listing.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::StoreUnavailable`] on store failure.
    pub async fn list(&self) -> Result<Vec<Product>, DomainError> {
        let mut products = Vec::new();
        for key in self.store.scan(&Namespace::Products.scan_prefix()).await? {
            if keys::is_counter_key(&key) {
                continue;
            }
            let Some(record) = self.store.get(&key).await? else {
                continue;
            };
            match Product::from_record(&record) {
                Ok(product) => products.push(product),
                Err(err) => warn!(%key, %err, "skipping malformed product record"),
            }
        }
        products.sort_by_key(|p| p.id);
        Ok(products)
    }

    /// Returns the product with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotFound`] when no such product exists.
    pub async fn get(&self, id: i64) -> Result<Product, DomainError> {
        let record = self
            .store
            .get(&Namespace::Products.key(id))
            .await?
            .ok_or_else(|| DomainError::not_found("product", id))?;
        Product::from_record(&record)
    }

    /// Creates a product with a freshly allocated id.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] for invalid fields, or a store
    /// error.
    pub async fn create(
        &self,
        draft: ProductDraft,
        clock: &dyn Clock,
    ) -> Result<Product, DomainError> {
        draft.validate()?;
        let id = ids::next_id(self.store.as_ref(), Namespace::Products).await?;
        let now = clock.now();
        let product = Product {
            id,
            name: draft.name,
            category: draft.category,
            description: draft.description,
            emoji: draft.emoji,
            price: draft.price,
            stock: draft.stock,
            created_at: now,
            updated_at: now,
        };
        self.store
            .put(&Namespace::Products.key(id), product.to_record())
            .await?;
        Ok(product)
    }

    /// Overwrites the product with `id`, preserving its creation timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotFound`] when no such product exists, or
    /// [`DomainError::Validation`] for invalid fields.
    pub async fn update(
        &self,
        id: i64,
        draft: ProductDraft,
        clock: &dyn Clock,
    ) -> Result<Product, DomainError> {
        draft.validate()?;
        let existing = self.get(id).await?;
        let product = Product {
            id,
            name: draft.name,
            category: draft.category,
            description: draft.description,
            emoji: draft.emoji,
            price: draft.price,
            stock: draft.stock,
            created_at: existing.created_at,
            updated_at: clock.now(),
        };
        self.store
            .put(&Namespace::Products.key(id), product.to_record())
            .await?;
        Ok(product)
    }

    /// Deletes the product with `id`. Returns `false` when it did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::StoreUnavailable`] on store failure.
    pub async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        self.store.delete(&Namespace::Products.key(id)).await
    }

    /// Atomically reserves `quantity` units of product `product_id` and
    /// returns the remaining stock.
    ///
    /// The decrement itself is the store's atomic increment; a negative
    /// result means the request raced past the available stock, in which
    /// case the decrement is compensated and the request rejected. Stock is
    /// never observable below zero.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotFound`] for an unknown product and
    /// [`DomainError::InsufficientStock`] when fewer than `quantity` units
    /// remain.
    pub async fn decrement_stock(
        &self,
        product_id: i64,
        quantity: i64,
    ) -> Result<i64, DomainError> {
        let key = Namespace::Products.key(product_id);
        if self.store.get(&key).await?.is_none() {
            return Err(DomainError::not_found("product", product_id));
        }
        let new_stock = self.store.incr(&key, "stock", -quantity).await?;
        if new_stock < 0 {
            self.store.incr(&key, "stock", quantity).await?;
            return Err(DomainError::InsufficientStock {
                product_id,
                requested: quantity,
                available: new_stock + quantity,
            });
        }
        Ok(new_stock)
    }

    /// Returns `quantity` units to product `product_id`. Used to unwind
    /// reservations when a later line of the same order fails.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::StoreUnavailable`] on store failure.
    pub async fn restore_stock(&self, product_id: i64, quantity: i64) -> Result<(), DomainError> {
        self.store
            .incr(&Namespace::Products.key(product_id), "stock", quantity)
            .await?;
        Ok(())
    }
}
