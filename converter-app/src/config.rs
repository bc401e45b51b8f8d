//! Configuration loading from YAML profiles.
//!
//! A profile named `NAME` lives in `<config dir>/NAME.yaml`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use converter_repo::RedisStoreConfig;
use converter_types::DEFAULT_KEY_PREFIX;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub redis: RedisConfig,
    pub host: String,
    pub port: u16,
    /// Log level name (`DEBUG`, `INFO`, `WARNING`, `ERROR`, `CRITICAL`)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Export spans over OTLP (endpoint taken from `OTEL_EXPORTER_OTLP_ENDPOINT`)
    #[serde(default)]
    pub otlp: bool,
}

/// Redis connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
    pub database: u32,
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
}

fn default_log_level() -> String {
    "INFO".to_string()
}

fn default_key_prefix() -> String {
    DEFAULT_KEY_PREFIX.to_string()
}

fn default_pool_size() -> usize {
    16
}

impl Config {
    /// Loads the `profile` configuration from `dir`.
    pub fn load(dir: &Path, profile: &str) -> anyhow::Result<Self> {
        let path = profile_path(dir, profile);
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Parses a configuration document.
    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Address the HTTP server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// `tracing` filter directive for the configured level.
    ///
    /// Unknown level names fall back to `info`.
    pub fn log_filter(&self) -> &'static str {
        match self.log_level.to_ascii_uppercase().as_str() {
            "TRACE" => "trace",
            "DEBUG" => "debug",
            "WARN" | "WARNING" => "warn",
            "ERROR" | "CRITICAL" | "FATAL" => "error",
            _ => "info",
        }
    }
}

impl RedisConfig {
    pub fn url(&self) -> String {
        format!("redis://{}:{}/{}", self.host, self.port, self.database)
    }

    pub fn store_config(&self) -> RedisStoreConfig {
        RedisStoreConfig {
            url: self.url(),
            key_prefix: self.key_prefix.clone(),
            pool_size: self.pool_size,
        }
    }
}

fn profile_path(dir: &Path, profile: &str) -> PathBuf {
    dir.join(format!("{}.yaml", profile))
}
