//! Storefront Core — shared domain types and abstractions.
//!
//! This crate defines the entity types, the error taxonomy, the clock
//! abstraction, and the `RecordStore` trait that every other crate depends
//! on. It contains no infrastructure code.

pub mod clock;
pub mod error;
pub mod keys;
pub mod order;
pub mod product;
pub mod promo;
pub mod record;
pub mod stats;
pub mod store;
pub mod user;
