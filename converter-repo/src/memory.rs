//! In-memory rate store adapter.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use converter_types::{CurrencyCode, DEFAULT_KEY_PREFIX, Rate, RateStore, StoreError, rate_key};

/// Rate store kept in process memory.
///
/// Mirrors the Redis layout (`<prefix>:<CODE>` → decimal string) so that code
/// inspecting keys behaves the same against both adapters. Every method holds
/// the lock for its whole body, which makes each batched call atomic.
pub struct InMemoryRateStore {
    key_prefix: String,
    entries: RwLock<BTreeMap<String, String>>,
}

impl Default for InMemoryRateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRateStore {
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_KEY_PREFIX)
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            key_prefix: prefix.into(),
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    /// Writes a raw value under a raw key, bypassing the port.
    ///
    /// Lets tests and demos seed data the way an out-of-band writer would.
    pub async fn put_raw(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.write().await.insert(key.into(), value.into());
    }

    /// Reads a raw value by its full key.
    pub async fn get_raw(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    fn namespace(&self) -> String {
        format!("{}:", self.key_prefix)
    }
}

#[async_trait]
impl RateStore for InMemoryRateStore {
    async fn get_rates(&self, codes: &[CurrencyCode]) -> Result<Vec<Option<String>>, StoreError> {
        let entries = self.entries.read().await;
        Ok(codes
            .iter()
            .map(|code| entries.get(&rate_key(&self.key_prefix, code)).cloned())
            .collect())
    }

    async fn set_rates(&self, rates: &BTreeMap<CurrencyCode, Rate>) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        for (code, rate) in rates {
            entries.insert(rate_key(&self.key_prefix, code), rate.to_string());
        }
        Ok(())
    }

    async fn delete_all_rates(&self) -> Result<(), StoreError> {
        let namespace = self.namespace();
        self.entries
            .write()
            .await
            .retain(|key, _| !key.starts_with(&namespace));
        Ok(())
    }

    async fn list_all_keys(&self) -> Result<Vec<String>, StoreError> {
        let namespace = self.namespace();
        Ok(self
            .entries
            .read()
            .await
            .keys()
            .filter(|key| key.starts_with(&namespace))
            .cloned()
            .collect())
    }
}
