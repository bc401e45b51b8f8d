//! # Converter Client SDK
//!
//! A typed Rust client for the Converter API.

use std::collections::BTreeMap;

use converter_types::{ConvertResponse, InsertBody, InsertResponse};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Converter API client.
pub struct ConverterClient {
    base_url: String,
    http: Client,
}

impl ConverterClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Converts `amount` of `from` into `to`.
    pub async fn convert(&self, from: &str, to: &str, amount: f64) -> Result<f64, ClientError> {
        let amount = amount.to_string();
        let resp = self
            .http
            .get(format!("{}/convert/", self.base_url))
            .query(&[("from", from), ("to", to), ("amount", amount.as_str())])
            .send()
            .await?;
        let body: ConvertResponse = self.handle_response(resp).await?;
        Ok(body.result)
    }

    /// Stores currency rates; with `merge == false` every existing rate is
    /// replaced by `currencies`.
    pub async fn insert(
        &self,
        currencies: BTreeMap<String, f64>,
        merge: bool,
    ) -> Result<(), ClientError> {
        let merge = if merge { "1" } else { "0" };
        let resp = self
            .http
            .post(format!("{}/database/", self.base_url))
            .query(&[("merge", merge)])
            .json(&InsertBody { currencies })
            .send()
            .await?;
        let _: InsertResponse = self.handle_response(resp).await?;
        Ok(())
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(ClientError::Api {
                status: status.as_u16(),
                message: error_message(body),
            })
        }
    }
}

/// Pulls the `error` field out of an error body; validation maps and other
/// bodies are returned as-is.
fn error_message(body: String) -> String {
    serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or(body)
}
