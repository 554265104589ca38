//! Custom error types for the API service

use auth::TokenError;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::DatabaseError;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing, expired or forged session
    #[error("Unauthorized")]
    Unauthorized,

    /// Bad request with message
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Path identifier is not a valid document id
    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    /// No route matched
    #[error("Not found")]
    NotFound,

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::InvalidPayload(_) => ApiError::BadRequest(err.to_string()),
            TokenError::Expired | TokenError::Invalid(_) => ApiError::Unauthorized,
            TokenError::Signing(_) | TokenError::Configuration(_) => {
                error!("Token service failure: {}", err);
                ApiError::InternalServerError
            }
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) | ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Database(DatabaseError::Timeout) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Database(DatabaseError::Connection(_) | DatabaseError::Query(_)) => {
                StatusCode::BAD_GATEWAY
            }
            ApiError::Database(DatabaseError::Migration(_) | DatabaseError::Configuration(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match &self {
            ApiError::Unauthorized => "Unauthorized".to_string(),
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::InvalidId(_) => self.to_string(),
            ApiError::NotFound => "Not found".to_string(),
            ApiError::InternalServerError => "Internal server error".to_string(),
            ApiError::Database(e) => {
                error!("Database failure: {}", e);
                match e {
                    DatabaseError::Timeout => "Database timed out".to_string(),
                    DatabaseError::Connection(_) => "Database unavailable".to_string(),
                    _ => "Database error".to_string(),
                }
            }
        };

        if status.is_client_error() {
            warn!("Request rejected ({}): {}", status, error_message);
        }

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_4xx() {
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::InvalidId("nope".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn store_failures_map_to_gateway_errors() {
        assert_eq!(
            ApiError::from(DatabaseError::Timeout).status(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            ApiError::from(DatabaseError::from(sqlx::Error::PoolClosed)).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::from(DatabaseError::from(sqlx::Error::RowNotFound)).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn token_failures_are_unauthorized_or_bad_request() {
        assert!(matches!(
            ApiError::from(TokenError::Expired),
            ApiError::Unauthorized
        ));
        assert!(matches!(
            ApiError::from(TokenError::InvalidPayload("a string")),
            ApiError::BadRequest(_)
        ));
    }

    #[test]
    fn response_carries_json_error_body() {
        let response = ApiError::InvalidId("abc".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[axum::http::header::CONTENT_TYPE],
            "application/json"
        );
    }
}
