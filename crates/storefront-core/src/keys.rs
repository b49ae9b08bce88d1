//! Record store key layout.
//!
//! Every entity lives at `{namespace}:{id}`, each namespace keeps one atomic
//! counter record at `{namespace}:counter`, and a single derived-stats record
//! lives at [`STATS_KEY`].

use std::fmt::Display;

/// Key of the single aggregate-stats record.
pub const STATS_KEY: &str = "storefront:stats";

/// Field name used inside counter records.
pub const COUNTER_FIELD: &str = "value";

/// Entity namespaces within the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    /// Product catalog records.
    Products,
    /// Immutable order snapshots.
    Orders,
    /// User records, keyed by external user id.
    Users,
    /// Promo codes, keyed by code.
    Promos,
}

impl Namespace {
    /// The key prefix for this namespace, without a trailing separator.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Products => "storefront:products",
            Self::Orders => "storefront:orders",
            Self::Users => "storefront:users",
            Self::Promos => "storefront:promos",
        }
    }

    /// Key of the record holding `id` within this namespace.
    #[must_use]
    pub fn key(self, id: impl Display) -> String {
        format!("{}:{id}", self.prefix())
    }

    /// Key of this namespace's identifier counter record.
    #[must_use]
    pub fn counter_key(self) -> String {
        format!("{}:counter", self.prefix())
    }

    /// Prefix passed to [`crate::store::RecordStore::scan`] to enumerate
    /// this namespace.
    #[must_use]
    pub fn scan_prefix(self) -> String {
        format!("{}:", self.prefix())
    }
}

/// Whether `key` addresses a namespace counter rather than an entity.
#[must_use]
pub fn is_counter_key(key: &str) -> bool {
    key.ends_with(":counter")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_and_counter_keys() {
        assert_eq!(Namespace::Products.key(7), "storefront:products:7");
        assert_eq!(Namespace::Promos.key("SUMMER10"), "storefront:promos:SUMMER10");
        assert_eq!(Namespace::Orders.counter_key(), "storefront:orders:counter");
        assert!(is_counter_key(&Namespace::Orders.counter_key()));
        assert!(!is_counter_key(&Namespace::Orders.key(12)));
    }
}
