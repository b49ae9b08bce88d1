//! Test record stores — in-memory and always-failing `RecordStore` fakes.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use storefront_core::error::DomainError;
use storefront_core::record::Record;
use storefront_core::store::RecordStore;

/// A fully in-memory record store with the same per-operation atomicity
/// guarantees as the real one. Every operation holds the map lock for its
/// whole duration, so `incr` is an indivisible read-modify-write exactly
/// like the store-level atomic increment it stands in for.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: Mutex<HashMap<String, Record>>,
}

impl MemoryRecordStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a record directly, bypassing the trait. For test fixtures.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn seed(&self, key: &str, record: Record) {
        self.records.lock().unwrap().insert(key.to_owned(), record);
    }

    /// Returns a snapshot of the record at `key`, if any. For assertions.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn snapshot(&self, key: &str) -> Option<Record> {
        self.records.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn get(&self, key: &str) -> Result<Option<Record>, DomainError> {
        Ok(self.records.lock().unwrap().get(key).cloned())
    }

    async fn put(&self, key: &str, record: Record) -> Result<(), DomainError> {
        let mut records = self.records.lock().unwrap();
        records.entry(key.to_owned()).or_default().extend(record);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        Ok(self.records.lock().unwrap().remove(key).is_some())
    }

    async fn incr(&self, key: &str, field: &str, delta: i64) -> Result<i64, DomainError> {
        let mut records = self.records.lock().unwrap();
        let record = records.entry(key.to_owned()).or_default();
        let current: i64 = match record.get(field) {
            None => 0,
            Some(raw) => raw.parse().map_err(|_| {
                DomainError::Validation(format!("field is not an integer: {field}"))
            })?,
        };
        let next = current + delta;
        record.insert(field.to_owned(), next.to_string());
        Ok(next)
    }

    async fn scan(&self, prefix: &str) -> Result<Vec<String>, DomainError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }
}

/// A record store whose every operation fails with
/// [`DomainError::StoreUnavailable`]. Useful for error-path tests.
#[derive(Debug, Default)]
pub struct FailingRecordStore;

fn unavailable() -> DomainError {
    DomainError::StoreUnavailable("connection refused".into())
}

#[async_trait]
impl RecordStore for FailingRecordStore {
    async fn get(&self, _key: &str) -> Result<Option<Record>, DomainError> {
        Err(unavailable())
    }

    async fn put(&self, _key: &str, _record: Record) -> Result<(), DomainError> {
        Err(unavailable())
    }

    async fn delete(&self, _key: &str) -> Result<bool, DomainError> {
        Err(unavailable())
    }

    async fn incr(&self, _key: &str, _field: &str, _delta: i64) -> Result<i64, DomainError> {
        Err(unavailable())
    }

    async fn scan(&self, _prefix: &str) -> Result<Vec<String>, DomainError> {
        Err(unavailable())
    }
}
