//! Rate store port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (Redis, InMemory) implement it over a key-value store where every
//! rate lives under `<prefix>:<CODE>` as a decimal string.

use std::collections::BTreeMap;

use crate::domain::{CurrencyCode, Rate};
use crate::error::StoreError;

/// Batched access to the stored currency rates.
///
/// Each method issues at most one batched store command (plus the key listing
/// for `delete_all_rates`), so each call is as atomic as the store makes it.
#[async_trait::async_trait]
pub trait RateStore: Send + Sync + 'static {
    /// Fetches the raw stored values for `codes` in one round trip.
    ///
    /// Returns one entry per input code, in input order; `None` where the
    /// currency has no stored rate.
    async fn get_rates(&self, codes: &[CurrencyCode]) -> Result<Vec<Option<String>>, StoreError>;

    /// Writes all `rates` in one round trip, overwriting existing entries.
    /// An empty mapping issues no command.
    async fn set_rates(&self, rates: &BTreeMap<CurrencyCode, Rate>) -> Result<(), StoreError>;

    /// Removes every rate under the namespace. Issues no delete when the
    /// namespace is already empty.
    async fn delete_all_rates(&self) -> Result<(), StoreError>;

    /// Lists every key under the namespace, prefix included.
    async fn list_all_keys(&self) -> Result<Vec<String>, StoreError>;
}
