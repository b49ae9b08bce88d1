//! Promo redemption gate.
//!
//! Redemption is check-then-increment, which must not be separable into two
//! observable steps under concurrent callers. The gate increments `used`
//! first and verifies the result: a redemption that lands past the limit
//! compensates its own increment and reports `LimitReached`, so the number
//! of successful redemptions can never exceed `uses` under any interleaving.

use std::sync::Arc;

use storefront_core::clock::Clock;
use storefront_core::error::DomainError;
use storefront_core::keys::Namespace;
use storefront_core::promo::{PromoCode, PromoDraft};
use storefront_core::store::RecordStore;
use tracing::{info, warn};

/// Repository and redemption gate over the promo namespace.
#[derive(Clone)]
pub struct PromoGate {
    store: Arc<dyn RecordStore>,
}

impl PromoGate {
    /// Creates a gate over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Returns all promo codes. Malformed records are skipped with a
    /// warning.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::StoreUnavailable`] on store failure.
    pub async fn list(&self) -> Result<Vec<PromoCode>, DomainError> {
        let mut promos = Vec::new();
        for key in self.store.scan(&Namespace::Promos.scan_prefix()).await? {
            let Some(record) = self.store.get(&key).await? else {
                continue;
            };
            match PromoCode::from_record(&record) {
                Ok(promo) => promos.push(promo),
                Err(err) => warn!(%key, %err, "skipping malformed promo record"),
            }
        }
        promos.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(promos)
    }

    /// Registers a promo code with zero consumed uses.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] for invalid fields, or a store
    /// error.
    pub async fn create(
        &self,
        draft: PromoDraft,
        clock: &dyn Clock,
    ) -> Result<PromoCode, DomainError> {
        draft.validate()?;
        let now = clock.now();
        let promo = PromoCode {
            code: draft.code,
            discount: draft.discount,
            uses: draft.uses,
            used: 0,
            created_at: now,
            updated_at: now,
        };
        self.store
            .put(&Namespace::Promos.key(&promo.code), promo.to_record())
            .await?;
        Ok(promo)
    }

    /// Atomically consumes one use of `code` and returns its discount.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotFound`] for an unknown code and
    /// [`DomainError::LimitReached`] once the use limit is exhausted.
    pub async fn redeem(&self, code: &str) -> Result<i64, DomainError> {
        let key = Namespace::Promos.key(code);
        let record = self
            .store
            .get(&key)
            .await?
            .ok_or_else(|| DomainError::not_found("promo", code))?;
        let promo = PromoCode::from_record(&record)?;

        let used = self.store.incr(&key, "used", 1).await?;
        if used > promo.uses {
            self.store.incr(&key, "used", -1).await?;
            return Err(DomainError::LimitReached { code: code.to_owned() });
        }

        info!(code, used, uses = promo.uses, "promo redeemed");
        Ok(promo.discount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use storefront_core::record;
    use storefront_test_support::{FixedClock, MemoryRecordStore};

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }

    fn gate_with(store: Arc<MemoryRecordStore>) -> PromoGate {
        PromoGate::new(store)
    }

    async fn seed(gate: &PromoGate, code: &str, discount: i64, uses: i64) {
        gate.create(
            PromoDraft { code: code.into(), discount, uses },
            &clock(),
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_redeem_returns_discount_and_consumes_a_use() {
        let store = Arc::new(MemoryRecordStore::new());
        let gate = gate_with(store.clone());
        seed(&gate, "SUMMER10", 10, 1).await;

        assert_eq!(gate.redeem("SUMMER10").await.unwrap(), 10);

        let record = store
            .snapshot(&Namespace::Promos.key("SUMMER10"))
            .unwrap();
        assert_eq!(record::require_i64(&record, "used").unwrap(), 1);
    }

    #[tokio::test]
    async fn test_redeem_past_limit_fails_and_used_stays_at_limit() {
        let store = Arc::new(MemoryRecordStore::new());
        let gate = gate_with(store.clone());
        seed(&gate, "SUMMER10", 10, 1).await;

        gate.redeem("SUMMER10").await.unwrap();
        let err = gate.redeem("SUMMER10").await.unwrap_err();
        assert!(matches!(err, DomainError::LimitReached { .. }));

        let record = store
            .snapshot(&Namespace::Promos.key("SUMMER10"))
            .unwrap();
        assert_eq!(record::require_i64(&record, "used").unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unknown_code_is_not_found() {
        let gate = gate_with(Arc::new(MemoryRecordStore::new()));
        assert!(matches!(
            gate.redeem("NOPE").await,
            Err(DomainError::NotFound { entity: "promo", .. })
        ));
    }

    #[tokio::test]
    async fn test_concurrent_redemptions_never_exceed_limit() {
        let store = Arc::new(MemoryRecordStore::new());
        let gate = gate_with(store.clone());
        seed(&gate, "LAST3", 25, 3).await;

        let mut handles = Vec::new();
        for _ in 0..10 {
            let gate = gate.clone();
            handles.push(tokio::spawn(async move { gate.redeem("LAST3").await }));
        }
        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }
        assert_eq!(successes, 3);

        let record = store.snapshot(&Namespace::Promos.key("LAST3")).unwrap();
        assert_eq!(record::require_i64(&record, "used").unwrap(), 3);
    }
}
