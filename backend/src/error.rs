//! Application error handling
//!
//! This module provides unified error handling for the API,
//! converting internal errors to appropriate HTTP responses.

use crate::repositories::StoreError;
use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use sessiongate_shared::AuthError;
use thiserror::Error;
use tracing::error;

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Store error")]
    Store(#[from] StoreError),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ApiError {
    /// HTTP status this error maps to
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Auth(AuthError::DuplicateUser | AuthError::InvalidCredentials) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Auth(AuthError::MissingToken) => StatusCode::UNAUTHORIZED,
            ApiError::Auth(AuthError::InvalidToken | AuthError::ExpiredToken) => {
                StatusCode::FORBIDDEN
            }
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Store(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match &self {
            ApiError::Validation(msg) => ("VALIDATION_ERROR", msg.clone()),
            ApiError::Auth(err) => (err.code(), err.to_string()),
            ApiError::Upstream(msg) => {
                error!("Upstream error: {}", msg);
                ("UPSTREAM_ERROR", "The upstream service failed".to_string())
            }
            ApiError::Unavailable(msg) => ("SERVICE_UNAVAILABLE", msg.clone()),
            ApiError::Store(err) => {
                error!("Store error: {:?}", err);
                ("STORE_ERROR", "Server error".to_string())
            }
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                ("INTERNAL_ERROR", "Server error".to_string())
            }
        };

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        });

        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

/// JSON body extractor whose rejections use the API error shape
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AuthError::DuplicateUser, StatusCode::BAD_REQUEST)]
    #[case(AuthError::InvalidCredentials, StatusCode::BAD_REQUEST)]
    #[case(AuthError::MissingToken, StatusCode::UNAUTHORIZED)]
    #[case(AuthError::InvalidToken, StatusCode::FORBIDDEN)]
    #[case(AuthError::ExpiredToken, StatusCode::FORBIDDEN)]
    fn test_auth_error_status(#[case] error: AuthError, #[case] status: StatusCode) {
        let response = ApiError::from(error).into_response();
        assert_eq!(response.status(), status);
    }

    #[test]
    fn test_validation_error_status() {
        let error = ApiError::Validation("Username cannot be empty".to_string());
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let error = ApiError::Internal(anyhow::anyhow!("connection string leaked"));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(!body.contains("leaked"));
        assert!(body.contains("INTERNAL_ERROR"));
    }

    #[tokio::test]
    async fn test_store_error_hides_detail() {
        let error = ApiError::Store(StoreError::Backend(anyhow::anyhow!("pg: relation users")));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(!String::from_utf8_lossy(&body).contains("relation"));
    }
}
