//! Storefront Ledger — the subsystems with real invariants.
//!
//! Everything here operates on `dyn RecordStore` and builds its exclusivity
//! guarantees on the store's atomic field increment: unique monotonic
//! identifiers, non-negative stock, bounded promo redemption, and stats that
//! are a deterministic function of the ledger.

pub mod catalog;
pub mod ids;
pub mod orders;
pub mod promos;
pub mod stats;
pub mod users;
