//! # Converter Repository
//!
//! Concrete rate store implementations (adapters) for the converter service.
//! This crate provides the adapters that implement the `RateStore` port:
//!
//! - `RedisRateStore` (feature `redis`, on by default) - pooled Redis client
//! - `InMemoryRateStore` - process-local map with the same key layout, for
//!   tests and local runs

pub mod memory;
#[cfg(feature = "redis")]
pub mod redis_store;


pub use memory::InMemoryRateStore;
#[cfg(feature = "redis")]
pub use redis_store::{RedisRateStore, RedisStoreConfig};

/// Build and connect a Redis-backed rate store.
///
/// This function:
/// 1. Creates the connection pool
/// 2. Verifies the server answers `PING`
/// 3. Returns a ready-to-use `RedisRateStore`
///
/// # Examples
///
/// ```ignore
/// let store = build_store(RedisStoreConfig {
///     url: "redis://localhost:6379/0".into(),
///     ..Default::default()
/// })
/// .await?;
/// ```
#[cfg(feature = "redis")]
pub async fn build_store(config: RedisStoreConfig) -> anyhow::Result<RedisRateStore> {
    RedisRateStore::connect(config).await
}
