//! User repository.
//!
//! Users materialize lazily on first lookup. The admin flag is never
//! persisted here; it is derived from configuration at the API layer.

use std::sync::Arc;

use storefront_core::clock::Clock;
use storefront_core::error::DomainError;
use storefront_core::keys::Namespace;
use storefront_core::store::RecordStore;
use storefront_core::user::{User, UserDraft};
use tracing::info;

/// Repository over the user namespace.
#[derive(Clone)]
pub struct Users {
    store: Arc<dyn RecordStore>,
}

impl Users {
    /// Creates a repository over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Returns the user with `id`, creating the default record on first
    /// lookup. A second lookup returns the stored record unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::StoreUnavailable`] on store failure.
    pub async fn get_or_create(&self, id: i64, clock: &dyn Clock) -> Result<User, DomainError> {
        let key = Namespace::Users.key(id);
        if let Some(record) = self.store.get(&key).await? {
            return User::from_record(&record);
        }
        let user = User::with_defaults(id, clock.now());
        self.store.put(&key, user.to_record()).await?;
        info!(user_id = id, "user created on first lookup");
        Ok(user)
    }

    /// Overwrites the user with `id`, preserving its creation timestamp when
    /// the record already exists.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] for invalid fields, or a store
    /// error.
    pub async fn update(
        &self,
        id: i64,
        draft: UserDraft,
        clock: &dyn Clock,
    ) -> Result<User, DomainError> {
        draft.validate()?;
        let key = Namespace::Users.key(id);
        let now = clock.now();
        let created_at = match self.store.get(&key).await? {
            Some(record) => User::from_record(&record)?.created_at,
            None => now,
        };
        let user = User {
            id,
            username: draft.username,
            bonus: draft.bonus,
            referrals: draft.referrals,
            referral_code: draft.referral_code,
            created_at,
            updated_at: now,
        };
        self.store.put(&key, user.to_record()).await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use storefront_test_support::{FixedClock, MemoryRecordStore};

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }

    fn users() -> Users {
        Users::new(Arc::new(MemoryRecordStore::new()))
    }

    #[tokio::test]
    async fn test_first_lookup_creates_defaults() {
        let users = users();
        let user = users.get_or_create(42, &clock()).await.unwrap();
        assert_eq!(user.username, "user_42");
        assert_eq!(user.bonus, 0);
        assert!(user.referrals.is_empty());
        assert_eq!(user.referral_code, "REF000042");
    }

    #[tokio::test]
    async fn test_second_lookup_returns_same_record() {
        let users = users();
        let first = users.get_or_create(42, &clock()).await.unwrap();
        let later = FixedClock(Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap());
        let second = users.get_or_create(42, &later).await.unwrap();
        assert_eq!(second.created_at, first.created_at);
        assert_eq!(second.username, first.username);
    }

    #[tokio::test]
    async fn test_update_preserves_created_at() {
        let users = users();
        let created = users.get_or_create(42, &clock()).await.unwrap();
        let later = FixedClock(Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap());
        let updated = users
            .update(
                42,
                UserDraft {
                    username: "alex".into(),
                    bonus: 100,
                    referrals: vec![7],
                    referral_code: "REF000042".into(),
                },
                &later,
            )
            .await
            .unwrap();
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.updated_at, later.0);
        assert_eq!(updated.bonus, 100);
        assert_eq!(updated.referrals, vec![7]);
    }

    #[tokio::test]
    async fn test_update_rejects_negative_bonus() {
        let users = users();
        let result = users
            .update(
                42,
                UserDraft {
                    username: "alex".into(),
                    bonus: -5,
                    referrals: vec![],
                    referral_code: String::new(),
                },
                &clock(),
            )
            .await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }
}
