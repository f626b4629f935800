//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes.
//!
//! Store errors never reach clients verbatim: they are logged here and
//! collapsed into [`AppError::Internal`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::time::Duration;

/// Errors raised by a [`Store`](crate::store::Store) implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Query or connection failure.
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// The operation did not finish within the configured query timeout.
    #[error("Store operation timed out after {0:?}")]
    Timeout(Duration),

    /// A unique constraint was violated (e.g. a phone already registered).
    #[error("Unique constraint violated")]
    Conflict,
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => StoreError::Conflict,
            other => StoreError::Database(other),
        }
    }
}

/// Application-wide error type.
///
/// Each variant maps to an HTTP status code; the response body is the
/// canonical reason phrase for that code.
///
/// # Status Code Mapping
///
/// - `NotFound`, `NoSuchUser` → 404 Not Found
/// - `InvalidRequest`, `InvalidPassword`, `TokenExpired` → 400 Bad Request
/// - `Unauthorized` → 401 Unauthorized
/// - `Conflict` → 409 Conflict
/// - `Internal` → 500 Internal Server Error
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No matching row.
    #[error("item not found")]
    NotFound,

    /// Store, transport or randomness-source failure. Details are logged, not returned.
    #[error("internal error")]
    Internal,

    /// No customer is registered under the given login, or the token is unknown.
    #[error("no such user")]
    NoSuchUser,

    #[error("invalid password")]
    InvalidPassword,

    #[error("token expired")]
    TokenExpired,

    /// Request body or parameters are invalid.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The write would violate a uniqueness rule.
    #[error("conflict")]
    Conflict,

    /// Missing or rejected credentials.
    #[error("unauthorized")]
    Unauthorized,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound | AppError::NoSuchUser => StatusCode::NOT_FOUND,
            AppError::InvalidRequest(_) | AppError::InvalidPassword | AppError::TokenExpired => {
                StatusCode::BAD_REQUEST
            }
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Conflict => StatusCode::CONFLICT,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict => AppError::Conflict,
            other => {
                tracing::error!(error = %other, "store operation failed");
                AppError::Internal
            }
        }
    }
}

/// Plain-text response carrying the standard reason phrase for `status`.
pub fn reason_response(status: StatusCode) -> Response {
    (status, status.canonical_reason().unwrap_or_default()).into_response()
}

/// Convert AppError into an HTTP response.
///
/// This implementation allows Axum handlers and middleware to return
/// `Result<T, AppError>` and have errors converted to proper HTTP responses.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        reason_response(self.status_code())
    }
}

/// Structured failure returned by the two token endpoints.
///
/// ```json
/// { "status": "fail", "reason": "expired" }
/// ```
#[derive(Debug)]
pub struct TokenFailure {
    pub status: StatusCode,
    pub reason: &'static str,
}

impl TokenFailure {
    pub fn new(status: StatusCode, reason: &'static str) -> Self {
        Self { status, reason }
    }

    pub fn bad_request() -> Self {
        Self::new(StatusCode::BAD_REQUEST, "bad request")
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
    }
}

impl IntoResponse for TokenFailure {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "status": "fail",
            "reason": self.reason,
        }));

        (self.status, body).into_response()
    }
}
