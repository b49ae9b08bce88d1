//! Redis-backed implementation of the `RecordStore` trait.

mod redis_record_store;

pub use redis_record_store::RedisRecordStore;
