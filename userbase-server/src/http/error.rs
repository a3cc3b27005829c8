//! API error types with IntoResponse
//!
//! Errors are converted to `{"error": "<message>"}` JSON responses with
//! the mapped status code. Headers and status are finalized before the
//! body is written, by construction of axum responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::users::DbError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Path id failed the numeric gate (400)
    InvalidId,

    /// Request body failed JSON decoding (400)
    InvalidPayload,

    /// No row for a single-entity fetch (404)
    NotFound,

    /// Any other database failure (500, logged, message surfaced)
    Database(DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::InvalidId => (StatusCode::BAD_REQUEST, "Invalid user ID".to_string()),
            Self::InvalidPayload => (
                StatusCode::BAD_REQUEST,
                "Invalid request payload".to_string(),
            ),
            Self::NotFound => (StatusCode::NOT_FOUND, "User not found".to_string()),
            Self::Database(e) => {
                tracing::error!("database error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { .. } => Self::NotFound,
            other => Self::Database(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn invalid_id_is_400() {
        let response = ApiError::InvalidId.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Invalid user ID");
    }

    #[tokio::test]
    async fn invalid_payload_is_400() {
        let response = ApiError::InvalidPayload.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Invalid request payload");
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "User not found");
    }

    #[tokio::test]
    async fn database_error_is_500_with_message() {
        let err = ApiError::from(DbError::Sqlx(sqlx::Error::PoolClosed));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().starts_with("database error"));
    }

    #[tokio::test]
    async fn db_not_found_maps_to_404() {
        let err = ApiError::from(DbError::NotFound { id: 42 });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn content_type_is_json() {
        let response = ApiError::InvalidId.into_response();
        assert_eq!(
            response.headers()["content-type"],
            "application/json"
        );
    }
}
