//! Order fulfillment engine.
//!
//! An order moves `Requested → Validated → Committed`, or is rejected with
//! no side effects. Commit applies all line-item stock effects as one unit:
//! reservations are taken with the conditional decrement and unwound with
//! compensating increments if any later step fails, so a rejected order
//! never leaves partial stock mutations behind.

use std::sync::Arc;

use storefront_core::clock::Clock;
use storefront_core::error::DomainError;
use storefront_core::keys::{self, Namespace};
use storefront_core::order::{Order, OrderDraft, OrderItem, STATUS_PENDING};
use storefront_core::store::RecordStore;
use tracing::{error, info, warn};

use crate::catalog::Catalog;
use crate::{ids, stats};

/// Validates and commits orders against the inventory ledger.
#[derive(Clone)]
pub struct OrderEngine {
    store: Arc<dyn RecordStore>,
    catalog: Catalog,
}

impl OrderEngine {
    /// Creates an engine over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        let catalog = Catalog::new(Arc::clone(&store));
        Self { store, catalog }
    }

    /// Validates and commits `draft` as a new order.
    ///
    /// The total is recomputed server-side from live catalog prices; any
    /// client-supplied total never reaches this function. Stock is reserved
    /// per line with the conditional decrement; the first failed line rolls
    /// back every prior reservation and rejects the whole order.
    ///
    /// A stats recompute failure after the order is durable is logged and
    /// does not fail the commit.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] for a malformed draft,
    /// [`DomainError::NotFound`] when a line references an unknown product,
    /// [`DomainError::InsufficientStock`] when a line exceeds available
    /// stock, or [`DomainError::StoreUnavailable`] on store failure.
    pub async fn create(&self, draft: OrderDraft, clock: &dyn Clock) -> Result<Order, DomainError> {
        draft.validate()?;

        // Resolve every product up front; an unknown product rejects the
        // whole order before any stock is touched.
        let mut total = 0;
        for item in &draft.items {
            let product = self.catalog.get(item.product_id).await?;
            total += product.price * item.quantity;
        }

        let id = ids::next_id(self.store.as_ref(), Namespace::Orders).await?;

        let mut reserved: Vec<&OrderItem> = Vec::new();
        for item in &draft.items {
            match self.catalog.decrement_stock(item.product_id, item.quantity).await {
                Ok(_) => reserved.push(item),
                Err(err) => {
                    self.release(&reserved).await;
                    return Err(err);
                }
            }
        }

        let now = clock.now();
        let order = Order {
            id,
            user_id: draft.user_id,
            items: draft.items.clone(),
            total,
            status: STATUS_PENDING.to_owned(),
            created_at: now,
            updated_at: now,
        };
        if let Err(err) = self
            .store
            .put(&Namespace::Orders.key(id), order.to_record())
            .await
        {
            // The order record never became durable; unwind reservations so
            // the rejection has no side effects.
            self.release(&reserved).await;
            return Err(err);
        }

        info!(order_id = id, user_id = order.user_id, total, "order committed");

        if let Err(err) = stats::recompute(self.store.as_ref(), clock).await {
            warn!(order_id = id, %err, "stats recompute failed after order commit");
        }
        Ok(order)
    }

    /// Returns compensating increments for already-reserved lines. Failures
    /// here mean the store is down mid-rollback; they are logged, since the
    /// original rejection is what the caller needs to see.
    async fn release(&self, reserved: &[&OrderItem]) {
        for item in reserved {
            if let Err(err) = self
                .catalog
                .restore_stock(item.product_id, item.quantity)
                .await
            {
                error!(
                    product_id = item.product_id,
                    quantity = item.quantity,
                    %err,
                    "failed to restore reserved stock"
                );
            }
        }
    }

    /// Returns all orders, newest id first. Malformed records are skipped
    /// with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::StoreUnavailable`] on store failure.
    pub async fn list(&self) -> Result<Vec<Order>, DomainError> {
        let mut orders = Vec::new();
        for key in self.store.scan(&Namespace::Orders.scan_prefix()).await? {
            if keys::is_counter_key(&key) {
                continue;
            }
            let Some(record) = self.store.get(&key).await? else {
                continue;
            };
            match Order::from_record(&record) {
                Ok(order) => orders.push(order),
                Err(err) => warn!(%key, %err, "skipping malformed order record"),
            }
        }
        orders.sort_by_key(|o| std::cmp::Reverse(o.id));
        Ok(orders)
    }

    /// Returns all orders placed by `user_id`, newest id first.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::StoreUnavailable`] on store failure.
    pub async fn for_user(&self, user_id: i64) -> Result<Vec<Order>, DomainError> {
        let mut orders = self.list().await?;
        orders.retain(|o| o.user_id == user_id);
        Ok(orders)
    }

    /// Sets the status of order `order_id`. No transition table is enforced;
    /// any value is accepted and persisted.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotFound`] when the order does not exist.
    pub async fn update_status(
        &self,
        order_id: i64,
        status: &str,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        let key = Namespace::Orders.key(order_id);
        if self.store.get(&key).await?.is_none() {
            return Err(DomainError::not_found("order", order_id));
        }
        let patch = storefront_core::record::Record::from([
            ("status".to_owned(), status.to_owned()),
            ("updated_at".to_owned(), clock.now().to_rfc3339()),
        ]);
        self.store.put(&key, patch).await?;

        info!(order_id, status, "order status updated");

        if let Err(err) = stats::recompute(self.store.as_ref(), clock).await {
            warn!(order_id, %err, "stats recompute failed after status update");
        }
        Ok(())
    }
}
