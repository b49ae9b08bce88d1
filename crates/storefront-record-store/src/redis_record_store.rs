//! Redis implementation of the `RecordStore` trait.
//!
//! Records map onto Redis hashes: `get`/`put` are `HGETALL`/`HSET`, the
//! atomic field increment is `HINCRBY`, and namespace enumeration is `KEYS`
//! with a prefix pattern. Every call is bounded by a timeout; expiry and
//! connection errors both surface as `DomainError::StoreUnavailable`.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use storefront_core::error::DomainError;
use storefront_core::record::Record;
use storefront_core::store::RecordStore;

/// Default per-operation timeout.
const OP_TIMEOUT: Duration = Duration::from_secs(2);

/// Redis-backed record store.
///
/// Cheap to clone; the underlying `ConnectionManager` multiplexes a single
/// reconnecting connection.
#[derive(Clone)]
pub struct RedisRecordStore {
    conn: ConnectionManager,
    op_timeout: Duration,
}

impl RedisRecordStore {
    /// Connects to Redis at `url` and fails fast if it is unreachable.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::StoreUnavailable`] when the URL is invalid or
    /// the initial connection cannot be established.
    pub async fn connect(url: &str) -> Result<Self, DomainError> {
        let client = Client::open(url)
            .map_err(|e| DomainError::StoreUnavailable(format!("invalid redis url: {e}")))?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| DomainError::StoreUnavailable(format!("redis connect failed: {e}")))?;
        Ok(Self {
            conn,
            op_timeout: OP_TIMEOUT,
        })
    }

    /// Replaces the per-operation timeout.
    #[must_use]
    pub fn with_op_timeout(mut self, op_timeout: Duration) -> Self {
        self.op_timeout = op_timeout;
        self
    }

    /// Runs one store call under the operation timeout, folding both call
    /// errors and expiry into `StoreUnavailable`.
    async fn bounded<T>(
        &self,
        op: &'static str,
        fut: impl Future<Output = redis::RedisResult<T>>,
    ) -> Result<T, DomainError> {
        match tokio::time::timeout(self.op_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(DomainError::StoreUnavailable(format!("{op}: {err}"))),
            Err(_) => Err(DomainError::StoreUnavailable(format!("{op}: timed out"))),
        }
    }
}

#[async_trait]
impl RecordStore for RedisRecordStore {
    async fn get(&self, key: &str) -> Result<Option<Record>, DomainError> {
        let mut conn = self.conn.clone();
        let record: Record = self
            .bounded("hgetall", async move { conn.hgetall(key).await })
            .await?;
        // Redis reports a missing hash as an empty map.
        Ok(if record.is_empty() { None } else { Some(record) })
    }

    async fn put(&self, key: &str, record: Record) -> Result<(), DomainError> {
        if record.is_empty() {
            return Ok(());
        }
        let mut conn = self.conn.clone();
        let fields: Vec<(String, String)> = record.into_iter().collect();
        self.bounded("hset", async move {
            conn.hset_multiple(key, &fields).await
        })
        .await
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        let mut conn = self.conn.clone();
        let removed: i64 = self
            .bounded("del", async move { conn.del(key).await })
            .await?;
        Ok(removed > 0)
    }

    async fn incr(&self, key: &str, field: &str, delta: i64) -> Result<i64, DomainError> {
        let mut conn = self.conn.clone();
        self.bounded("hincrby", async move {
            conn.hincr(key, field, delta).await
        })
        .await
    }

    async fn scan(&self, prefix: &str) -> Result<Vec<String>, DomainError> {
        let mut conn = self.conn.clone();
        let pattern = format!("{prefix}*");
        self.bounded("keys", async move { conn.keys(pattern).await })
            .await
    }
}
