//! Identifier allocation.
//!
//! One atomic counter field per namespace. Issued values are strictly
//! increasing for the life of the store, survive process restarts, and are
//! never reused after record deletions. There is no in-process fallback: if
//! the store is down, allocation fails.

use storefront_core::error::DomainError;
use storefront_core::keys::{COUNTER_FIELD, Namespace};
use storefront_core::store::RecordStore;

/// Issues the next identifier for `namespace`.
///
/// # Errors
///
/// Returns [`DomainError::StoreUnavailable`] when the counter increment
/// cannot reach the store.
pub async fn next_id(store: &dyn RecordStore, namespace: Namespace) -> Result<i64, DomainError> {
    store
        .incr(&namespace.counter_key(), COUNTER_FIELD, 1)
        .await
}
