//! Record store abstraction.
//!
//! The store is the only durable state in the system and the only shared
//! mutable state across concurrent request handlers. All exclusivity is
//! built on its atomic field increment; no in-process locking exists outside
//! the in-memory test fake.

use async_trait::async_trait;

use crate::error::DomainError;
use crate::record::Record;

/// A network-accessible store of named records.
///
/// Implementations must bound every call with a timeout and surface expiry
/// or connection failure as [`DomainError::StoreUnavailable`].
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns all fields of the record at `key`, or `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<Record>, DomainError>;

    /// Sets the given fields on the record at `key`, creating it if needed.
    /// Fields not named in `record` are left untouched.
    async fn put(&self, key: &str, record: Record) -> Result<(), DomainError>;

    /// Deletes the record at `key`. Returns `true` if a record existed.
    async fn delete(&self, key: &str) -> Result<bool, DomainError>;

    /// Atomically adds `delta` to the integer field `field` of the record at
    /// `key` (treating an absent field as zero) and returns the
    /// post-increment value.
    ///
    /// This must be a single store-level operation with no observable
    /// read-modify-write window.
    async fn incr(&self, key: &str, field: &str, delta: i64) -> Result<i64, DomainError>;

    /// Returns all keys starting with `prefix`.
    async fn scan(&self, prefix: &str) -> Result<Vec<String>, DomainError>;
}
