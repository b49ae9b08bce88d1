//! Shared application state.

use std::collections::HashSet;
use std::sync::Arc;

use storefront_core::clock::Clock;
use storefront_core::store::RecordStore;
use storefront_ledger::catalog::Catalog;
use storefront_ledger::orders::OrderEngine;
use storefront_ledger::promos::PromoGate;
use storefront_ledger::users::Users;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The record store every subsystem persists into.
    pub store: Arc<dyn RecordStore>,
    /// Time source, swappable for tests.
    pub clock: Arc<dyn Clock>,
    /// Product catalog and inventory ledger.
    pub catalog: Catalog,
    /// Order fulfillment engine.
    pub orders: OrderEngine,
    /// Promo redemption gate.
    pub promos: PromoGate,
    /// User repository.
    pub users: Users,
    /// Privileged user ids from configuration.
    pub admin_ids: Arc<HashSet<i64>>,
}

impl AppState {
    /// Creates application state over a record store.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>, admin_ids: HashSet<i64>) -> Self {
        Self {
            catalog: Catalog::new(Arc::clone(&store)),
            orders: OrderEngine::new(Arc::clone(&store)),
            promos: PromoGate::new(Arc::clone(&store)),
            users: Users::new(Arc::clone(&store)),
            store,
            clock,
            admin_ids: Arc::new(admin_ids),
        }
    }

    /// Whether `user_id` belongs to the configured admin set.
    #[must_use]
    pub fn is_admin(&self, user_id: i64) -> bool {
        self.admin_ids.contains(&user_id)
    }
}
