//! Unified error handling for the server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use catalog_engine::Error as EngineError;
use serde::Serialize;

use crate::catalog::CatalogError;
use crate::storage::StoreError;

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    #[allow(dead_code)]
    NotFound(String),

    #[error("Internal error: {0}")]
    #[allow(dead_code)]
    Internal(String),
}

/// Error response body.
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

/// Status code for an engine error.
fn engine_status(error: &EngineError) -> StatusCode {
    match error {
        EngineError::ProductNotFound(_)
        | EngineError::ProductDeleted(_)
        | EngineError::CartItemNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::IdSpaceExhausted | EngineError::InvalidSlot { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        EngineError::MissingRequiredField(_) | EngineError::InvalidField { .. } => {
            StatusCode::BAD_REQUEST
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, details) = match &self {
            AppError::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Storage error".to_string(),
                    None,
                )
            }
            AppError::Engine(e) => {
                let status = engine_status(e);
                if status.is_server_error() {
                    tracing::error!("Engine error: {:?}", e);
                } else {
                    tracing::warn!("Engine error: {:?}", e);
                }
                (status, e.to_string(), None)
            }
            AppError::Catalog(e) => {
                tracing::warn!("Catalog error: {:?}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "Remote catalog unavailable".to_string(),
                    Some(e.to_string()),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    Some(msg.clone()),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
            details,
        });

        (status, body).into_response()
    }
}

/// Result type alias for handlers.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_errors_map_to_status() {
        assert_eq!(
            engine_status(&EngineError::ProductNotFound(1)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            engine_status(&EngineError::MissingRequiredField("title".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            engine_status(&EngineError::IdSpaceExhausted),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn catalog_errors_are_bad_gateway() {
        let error = AppError::Catalog(CatalogError::Status {
            status: 503,
            body: "down".into(),
        });
        assert_eq!(error.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}
