//! Shared test fakes and utilities for the storefront backend.

mod clock;
mod record_store;

pub use clock::FixedClock;
pub use record_store::{FailingRecordStore, MemoryRecordStore};
