//! Converter Application Service
//!
//! Orchestrates conversions and rate inserts through the store port.
//! Contains NO infrastructure logic - pure business orchestration.

use converter_types::{
    AppError, ConvertRequest, CurrencyCode, InsertRequest, RateStore, StoreError, ValidationErrors,
};

/// Reported under `amount` when the converted value does not fit in an f64.
pub const RESULT_TOO_LARGE: &str = "Number too large.";

/// Application service for currency operations.
///
/// Generic over `S: RateStore` - the adapter is injected at compile time.
/// This enables:
/// - Swapping Redis for the in-memory store without code changes
/// - Testing with a mock store
/// - Compile-time checks for port implementation
pub struct ConverterService<S: RateStore> {
    store: S,
}

impl<S: RateStore> ConverterService<S> {
    /// Creates a new converter service with the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Conversion
    // ─────────────────────────────────────────────────────────────────────────────

    /// Converts `amount` of `from` into `to`.
    ///
    /// Both rates are read with a single batched fetch. Fails with
    /// `UnknownCurrency` listing every code (from first, then to) that has no
    /// stored rate. A result that overflows to a non-finite value is rejected
    /// as a validation error on `amount`.
    pub async fn convert(&self, req: &ConvertRequest) -> Result<f64, AppError> {
        let codes = [req.from.clone(), req.to.clone()];
        let rates = self.store.get_rates(&codes).await?;

        let missing: Vec<String> = codes
            .iter()
            .zip(&rates)
            .filter(|(_, rate)| rate.is_none())
            .map(|(code, _)| code.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(AppError::UnknownCurrency(missing));
        }

        let from_rate = parse_stored_rate(&req.from, rates[0].as_deref())?;
        let to_rate = parse_stored_rate(&req.to, rates[1].as_deref())?;

        let result = req.amount * from_rate / to_rate;
        if !result.is_finite() {
            let mut errors = ValidationErrors::new();
            errors.add("amount", RESULT_TOO_LARGE);
            return Err(errors.into());
        }

        Ok(result)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Insertion
    // ─────────────────────────────────────────────────────────────────────────────

    /// Stores the submitted rates.
    ///
    /// With `merge` the rates are added or overwritten and everything else is
    /// kept; without it every existing rate is deleted first, so the stored
    /// set ends up equal to the submitted one. Rates are trusted as validated.
    pub async fn insert(&self, req: &InsertRequest) -> Result<(), AppError> {
        if !req.merge {
            self.store.delete_all_rates().await?;
        }

        self.store.set_rates(&req.currencies).await?;
        Ok(())
    }
}

fn parse_stored_rate(code: &CurrencyCode, value: Option<&str>) -> Result<f64, StoreError> {
    let value = value.unwrap_or_default();
    value.trim().parse().map_err(|_| StoreError::CorruptRate {
        key: code.to_string(),
        value: value.to_string(),
    })
}
