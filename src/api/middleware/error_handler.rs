//! Boundary translation of `AppError` into envelope responses.
//!
//! Every error a handler returns passes through here; nothing propagates
//! as an unhandled fault. Internal details (SQL, filesystem paths) are
//! logged but never serialized to the client.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::api::dto::ApiResponse;
use crate::error::AppError;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound { entity } => {
                (StatusCode::NOT_FOUND, format!("{entity} not found"))
            }
            AppError::Duplicate { entity, field, .. } => (
                StatusCode::CONFLICT,
                format!("{entity} {field} already exists"),
            ),
            AppError::Validation { reason, .. } => (StatusCode::BAD_REQUEST, reason.clone()),
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::Unauthorized { message } => (StatusCode::UNAUTHORIZED, message.clone()),
            AppError::Database { operation, source } => {
                error!(operation = %operation, error = %source, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database operation failed".to_string(),
                )
            }
            AppError::ConnectionPool { source } => {
                error!(error = %source, "connection pool error");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Database connection unavailable".to_string(),
                )
            }
            AppError::Internal { source } => {
                error!(error = %source, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ApiResponse::error(status.as_u16(), &message);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_maps_to_404_envelope() {
        let (status, body) = body_json(AppError::not_found("Book")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["status"], 404);
        assert_eq!(body["message"], "Book not found");
    }

    #[tokio::test]
    async fn duplicate_maps_to_409() {
        let error = AppError::Duplicate {
            entity: "Category".to_string(),
            field: "name".to_string(),
            value: "Fiksi".to_string(),
        };
        let (status, body) = body_json(error).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["message"], "Category name already exists");
    }

    #[tokio::test]
    async fn validation_maps_to_400_with_reason() {
        let (status, body) =
            body_json(AppError::validation("stock", "Stock must not be negative")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Stock must not be negative");
    }

    #[tokio::test]
    async fn internal_error_hides_details() {
        let error = AppError::Internal {
            source: anyhow::anyhow!("secret disk path exploded"),
        };
        let (status, body) = body_json(error).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "An internal error occurred");
        assert!(!body.to_string().contains("secret disk path"));
    }

    #[tokio::test]
    async fn unauthorized_maps_to_401() {
        let (status, body) = body_json(AppError::unauthorized("Authentication required")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Authentication required");
    }
}
