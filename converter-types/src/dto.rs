//! Data Transfer Objects (DTOs) for requests and responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CurrencyCode, Rate};

// ─────────────────────────────────────────────────────────────────────────────
// Conversion
// ─────────────────────────────────────────────────────────────────────────────

/// A validated conversion request.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertRequest {
    /// Currency to convert from
    pub from: CurrencyCode,
    /// Currency to convert to
    pub to: CurrencyCode,
    /// Amount of `from` currency; any finite number, including zero and negatives
    pub amount: f64,
}

/// Response after a successful conversion.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConvertResponse {
    /// Amount expressed in the `to` currency
    #[schema(example = 3.0)]
    pub result: f64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Insertion
// ─────────────────────────────────────────────────────────────────────────────

/// A validated insert request.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertRequest {
    pub currencies: BTreeMap<CurrencyCode, Rate>,
    /// Keep rates that are not mentioned in `currencies`
    pub merge: bool,
}

/// JSON body of `POST /database/`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InsertBody {
    /// Currency codes mapped to their rates; every rate must be positive
    #[schema(example = json!({"RUB": 1.0, "USD": 60.0}))]
    pub currencies: BTreeMap<String, f64>,
}

/// Response after a successful insert.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InsertResponse {
    #[schema(example = "ok")]
    pub ok: String,
}

impl Default for InsertResponse {
    fn default() -> Self {
        Self { ok: "ok".into() }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Error body for 404 responses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Currencies do not exist: B.")]
    pub error: String,
}
