//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use converter_types::dto::{ConvertResponse, ErrorResponse, InsertBody, InsertResponse};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Convert an amount from one currency to another
#[utoipa::path(
    get,
    path = "/convert/",
    tag = "rates",
    params(
        ("from" = String, Query, description = "Currency to convert from (case-insensitive)", example = "RUB"),
        ("to" = String, Query, description = "Currency to convert to (case-insensitive)", example = "USD"),
        ("amount" = f64, Query, description = "Amount of `from` currency", example = 180)
    ),
    responses(
        (status = 200, description = "Converted amount", body = ConvertResponse),
        (status = 404, description = "One or both currencies have no stored rate", body = ErrorResponse),
        (status = 422, description = "Field name mapped to error messages", body = inline(serde_json::Value),
            example = json!({"amount": ["Not a valid number."]}))
    )
)]
async fn convert() {}

/// Insert or replace currency rates
#[utoipa::path(
    post,
    path = "/database/",
    tag = "rates",
    params(
        ("merge" = i32, Query, description = "1 keeps rates not mentioned in the body, 0 replaces all rates", example = 1)
    ),
    request_body = InsertBody,
    responses(
        (status = 201, description = "Rates stored", body = InsertResponse),
        (status = 400, description = "Body is not valid JSON"),
        (status = 422, description = "Field name mapped to error messages", body = inline(serde_json::Value),
            example = json!({"currencies": {"CUR": {"value": ["Only positive not null values could be currency rates."]}}}))
    )
)]
async fn insert() {}

/// OpenAPI documentation for the Converter API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Currency Converter API",
        version = "1.0.0",
        description = "Converts amounts between currencies using rates kept in a shared key-value store.\n\nRates are relative to a common base: converting `amount` from A to B yields `amount * rate(A) / rate(B)`.",
        license(name = "MIT"),
    ),
    paths(health, convert, insert),
    components(schemas(ConvertResponse, ErrorResponse, InsertBody, InsertResponse)),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "rates", description = "Currency conversion and rate management"),
    )
)]
pub struct ApiDoc;
