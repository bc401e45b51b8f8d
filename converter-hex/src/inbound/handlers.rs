//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use utoipa::OpenApi;

use converter_types::{AppError, ConvertResponse, InsertResponse, RateStore};

use super::validation::{self, Params};
use crate::ConverterService;
use crate::openapi::ApiDoc;

/// Application state shared across handlers.
pub struct AppState<S: RateStore> {
    pub service: ConverterService<S>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            AppError::Validation(errors) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(errors)).into_response()
            }
            err @ AppError::UnknownCurrency(_) => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": err.to_string() })),
            )
                .into_response(),
            AppError::BadRequest(msg) => error_body(StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => {
                tracing::error!("Request failed: {}", msg);
                error_body(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".into())
            }
        }
    }
}

fn error_body(status: StatusCode, message: String) -> Response {
    let body = serde_json::json!({
        "error": message,
        "code": status.as_u16()
    });

    (status, Json(body)).into_response()
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// OpenAPI document for the service.
pub async fn openapi() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Convert an amount between two stored currencies.
#[tracing::instrument(skip(state))]
pub async fn convert<S: RateStore>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<Params>,
) -> Result<impl IntoResponse, ApiError> {
    let req = validation::validate_convert_query(&params).map_err(AppError::from)?;
    let result = state.service.convert(&req).await?;
    Ok(Json(ConvertResponse { result }))
}

/// Insert or replace currency rates.
#[tracing::instrument(skip(state, body), fields(body_len = body.len()))]
pub async fn insert<S: RateStore>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<Params>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let body = parse_json_body(&body)?;
    let req = validation::validate_insert(&params, body.as_ref()).map_err(AppError::from)?;

    state.service.insert(&req).await?;
    tracing::info!(
        merge = req.merge,
        count = req.currencies.len(),
        "Currency rates stored"
    );

    Ok((StatusCode::CREATED, Json(InsertResponse::default())))
}

/// An empty body counts as absent; anything else must be JSON.
fn parse_json_body(body: &[u8]) -> Result<Option<Value>, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map(Some)
        .map_err(|_| AppError::BadRequest("Invalid JSON body.".into()))
}
