//! Aggregate stats recomputation.
//!
//! A pure function of the full ledger: idempotent, deterministic, linear in
//! ledger size. The persisted record is a cache, never a source of truth.

use storefront_core::clock::Clock;
use storefront_core::error::DomainError;
use storefront_core::keys::{self, Namespace, STATS_KEY};
use storefront_core::order::{Order, STATUS_COMPLETED};
use storefront_core::stats::AggregateStats;
use storefront_core::store::RecordStore;
use tracing::warn;

async fn count_keys(store: &dyn RecordStore, namespace: Namespace) -> Result<i64, DomainError> {
    let keys = store.scan(&namespace.scan_prefix()).await?;
    let count = keys.iter().filter(|key| !keys::is_counter_key(key)).count();
    Ok(i64::try_from(count).unwrap_or(i64::MAX))
}

/// Recomputes the aggregate stats from a full ledger scan and persists the
/// result at the stats key.
///
/// # Errors
///
/// Returns [`DomainError::StoreUnavailable`] when the scan or the final
/// write fails.
pub async fn recompute(
    store: &dyn RecordStore,
    clock: &dyn Clock,
) -> Result<AggregateStats, DomainError> {
    let total_products = count_keys(store, Namespace::Products).await?;
    let total_users = count_keys(store, Namespace::Users).await?;

    let mut total_orders = 0;
    let mut total_revenue = 0;
    for key in store.scan(&Namespace::Orders.scan_prefix()).await? {
        if keys::is_counter_key(&key) {
            continue;
        }
        let Some(record) = store.get(&key).await? else {
            continue;
        };
        match Order::from_record(&record) {
            Ok(order) => {
                total_orders += 1;
                if order.status == STATUS_COMPLETED {
                    total_revenue += order.total;
                }
            }
            Err(err) => warn!(%key, %err, "skipping malformed order record"),
        }
    }

    let stats = AggregateStats {
        total_orders,
        total_products,
        total_users,
        total_revenue,
        updated_at: clock.now(),
    };
    store.put(STATS_KEY, stats.to_record()).await?;
    Ok(stats)
}

/// Returns the cached stats record, recomputing when it is absent or
/// unreadable. This is the one read path allowed to degrade: a failed cache
/// read falls back to a fresh recompute rather than failing the caller.
///
/// # Errors
///
/// Returns [`DomainError::StoreUnavailable`] when the fallback recompute
/// itself cannot reach the store.
pub async fn get(store: &dyn RecordStore, clock: &dyn Clock) -> Result<AggregateStats, DomainError> {
    match store.get(STATS_KEY).await {
        Ok(Some(record)) => match AggregateStats::from_record(&record) {
            Ok(stats) => Ok(stats),
            Err(err) => {
                warn!(%err, "malformed stats record, recomputing");
                recompute(store, clock).await
            }
        },
        Ok(None) => recompute(store, clock).await,
        Err(err) => {
            warn!(%err, "stats read failed, attempting recompute");
            recompute(store, clock).await
        }
    }
}
