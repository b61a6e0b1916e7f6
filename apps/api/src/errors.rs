use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::generation::{GenerationError, ServiceError};
use crate::session::SessionError;
use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

fn generation_status(err: &GenerationError) -> StatusCode {
    match err {
        GenerationError::Config => StatusCode::SERVICE_UNAVAILABLE,
        GenerationError::Service(ServiceError::QuotaExceeded) => StatusCode::TOO_MANY_REQUESTS,
        GenerationError::Service(_) | GenerationError::EmptyResponse => StatusCode::BAD_GATEWAY,
    }
}

fn store_failure(err: &StoreError) -> (StatusCode, &'static str, String) {
    tracing::error!("Store error: {err}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "DATABASE_ERROR",
        "Error: A database error occurred".to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Session(err) => match err {
                SessionError::MissingFields(_) => {
                    (StatusCode::BAD_REQUEST, "MISSING_FIELDS", err.to_string())
                }
                SessionError::BasicInfoRequired => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "BASIC_INFO_REQUIRED",
                    err.to_string(),
                ),
                SessionError::NothingGenerated => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "NOTHING_GENERATED",
                    err.to_string(),
                ),
                SessionError::OwnerRequired => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "OWNER_REQUIRED",
                    err.to_string(),
                ),
                SessionError::Generation(failure) => {
                    (generation_status(failure), failure.code(), failure.to_string())
                }
                SessionError::Store(store) => store_failure(store),
                SessionError::Render(_) | SessionError::RenderTask(_) => {
                    tracing::error!("Render error: {err}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "RENDER_ERROR",
                        "Error: The document could not be rendered".to_string(),
                    )
                }
            },
            AppError::Store(err) => store_failure(err),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
