//! Error types for the converter service.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Domain-level errors (business rule violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Rate must be positive, got {0}")]
    NonPositiveRate(f64),

    #[error("Rate must be a finite number")]
    NonFiniteRate,

    #[error("Rate is not a number: {0:?}")]
    InvalidRate(String),
}

/// Store-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Corrupt rate stored under {key}: {value:?}")]
    CorruptRate { key: String, value: String },
}

/// Errors reported for a single field.
///
/// Either a flat list of messages, or nested errors keyed by sub-field
/// (used for the entries of the `currencies` mapping).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldErrors {
    Messages(Vec<String>),
    Nested(BTreeMap<String, FieldErrors>),
}

/// Per-field validation failures, serialized as the 422 response body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, FieldErrors>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message against a top-level field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let entry = self
            .0
            .entry(field.into())
            .or_insert_with(|| FieldErrors::Messages(Vec::new()));
        match entry {
            FieldErrors::Messages(messages) => messages.push(message.into()),
            FieldErrors::Nested(_) => {}
        }
    }

    /// Records a message under `field.key.sub_field`.
    pub fn add_nested(
        &mut self,
        field: impl Into<String>,
        key: impl Into<String>,
        sub_field: impl Into<String>,
        message: impl Into<String>,
    ) {
        let entry = self
            .0
            .entry(field.into())
            .or_insert_with(|| FieldErrors::Nested(BTreeMap::new()));
        if let FieldErrors::Nested(keys) = entry {
            let inner = keys
                .entry(key.into())
                .or_insert_with(|| FieldErrors::Nested(BTreeMap::new()));
            if let FieldErrors::Nested(sub_fields) = inner {
                let slot = sub_fields
                    .entry(sub_field.into())
                    .or_insert_with(|| FieldErrors::Messages(Vec::new()));
                if let FieldErrors::Messages(messages) = slot {
                    messages.push(message.into());
                }
            }
        }
    }

    /// Folds another set of errors into this one.
    pub fn merge(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }

    pub fn get(&self, field: &str) -> Option<&FieldErrors> {
        self.0.get(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok(value)` when nothing was recorded, `Err(self)` otherwise.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.fields().collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Currencies do not exist: {}.", .0.join(", "))]
    UnknownCurrency(Vec<String>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_currency_message() {
        let err = AppError::UnknownCurrency(vec!["B".into()]);
        assert_eq!(err.to_string(), "Currencies do not exist: B.");

        let err = AppError::UnknownCurrency(vec!["A".into(), "B".into()]);
        assert_eq!(err.to_string(), "Currencies do not exist: A, B.");
    }

    #[test]
    fn test_validation_errors_serialize_flat() {
        let mut errors = ValidationErrors::new();
        errors.add("from", "Missing data for required field.");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "from": ["Missing data for required field."] })
        );
    }

    #[test]
    fn test_validation_errors_serialize_nested() {
        let mut errors = ValidationErrors::new();
        errors.add_nested("currencies", "CUR", "value", "Not a valid number.");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "currencies": { "CUR": { "value": ["Not a valid number."] } } })
        );
    }

    #[test]
    fn test_validation_errors_into_result() {
        assert_eq!(ValidationErrors::new().into_result(7).unwrap(), 7);

        let mut errors = ValidationErrors::new();
        errors.add("merge", "Not a valid integer.");
        assert!(errors.into_result(()).is_err());
    }

    #[test]
    fn test_store_error_maps_to_internal() {
        let err: AppError = StoreError::Unavailable("connection refused".into()).into();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
