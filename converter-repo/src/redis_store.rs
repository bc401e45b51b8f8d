//! Redis rate store adapter.

use std::collections::BTreeMap;

use async_trait::async_trait;
use deadpool_redis::{Config as PoolConfig, Connection, Pool, Runtime};
use redis::AsyncCommands;
use serde::Deserialize;
use tracing::debug;

use converter_types::{CurrencyCode, DEFAULT_KEY_PREFIX, Rate, RateStore, StoreError, rate_key};

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Redis store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RedisStoreConfig {
    /// Redis URL (e.g., "redis://localhost:6379/0")
    pub url: String,
    /// Namespace prepended to every rate key
    pub key_prefix: String,
    /// Connection pool size
    pub pool_size: usize,
}

impl Default for RedisStoreConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379/0".to_string(),
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            pool_size: 16,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Redis Store
// ─────────────────────────────────────────────────────────────────────────────

/// Redis-backed rate store.
///
/// Uses deadpool-redis for async connection pooling. Every port method maps
/// to a single batched command (`MGET`, `MSET`, `KEYS`, `DEL`).
pub struct RedisRateStore {
    pool: Pool,
    key_prefix: String,
}

impl RedisRateStore {
    /// Creates the pool and checks the server is reachable.
    pub async fn connect(config: RedisStoreConfig) -> anyhow::Result<Self> {
        debug!(
            "Creating Redis store: url={}, prefix={}, pool_size={}",
            config.url, config.key_prefix, config.pool_size
        );

        let pool = PoolConfig::from_url(&config.url)
            .builder()?
            .max_size(config.pool_size)
            .runtime(Runtime::Tokio1)
            .build()?;

        let mut conn = pool.get().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;

        debug!("Redis store initialized successfully");

        Ok(Self {
            pool,
            key_prefix: config.key_prefix,
        })
    }

    /// Returns the namespace prefix.
    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    /// Closes the pool; pending and future checkouts fail.
    pub fn close(&self) {
        debug!("Closing Redis pool");
        self.pool.close();
    }

    fn key(&self, code: &CurrencyCode) -> String {
        rate_key(&self.key_prefix, code)
    }

    async fn get_conn(&self) -> Result<Connection, StoreError> {
        self.pool.get().await.map_err(unavailable)
    }
}

fn namespace_pattern(prefix: &str) -> String {
    format!("{}:*", prefix)
}

fn unavailable(err: impl std::fmt::Display) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// Port implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl RateStore for RedisRateStore {
    async fn get_rates(&self, codes: &[CurrencyCode]) -> Result<Vec<Option<String>>, StoreError> {
        if codes.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<String> = codes.iter().map(|code| self.key(code)).collect();
        let mut conn = self.get_conn().await?;

        debug!("MGET {:?}", keys);

        redis::cmd("MGET")
            .arg(&keys)
            .query_async(&mut conn)
            .await
            .map_err(unavailable)
    }

    async fn set_rates(&self, rates: &BTreeMap<CurrencyCode, Rate>) -> Result<(), StoreError> {
        if rates.is_empty() {
            return Ok(());
        }

        let items: Vec<(String, String)> = rates
            .iter()
            .map(|(code, rate)| (self.key(code), rate.to_string()))
            .collect();
        let mut conn = self.get_conn().await?;

        debug!("MSET {} rates", items.len());

        conn.mset::<String, String, ()>(&items)
            .await
            .map_err(unavailable)
    }

    async fn delete_all_rates(&self) -> Result<(), StoreError> {
        let keys = self.list_all_keys().await?;
        if keys.is_empty() {
            debug!("No rates under {}, skipping DEL", self.key_prefix);
            return Ok(());
        }

        let mut conn = self.get_conn().await?;

        debug!("DEL {} rates", keys.len());

        conn.del::<_, ()>(keys).await.map_err(unavailable)
    }

    async fn list_all_keys(&self) -> Result<Vec<String>, StoreError> {
        let mut conn = self.get_conn().await?;
        conn.keys::<_, Vec<String>>(namespace_pattern(&self.key_prefix))
            .await
            .map_err(unavailable)
    }
}
