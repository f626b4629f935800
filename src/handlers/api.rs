//! Public customer API handlers.
//!
//! - POST /api/customers - Self-registration
//! - POST /api/customers/token - Exchange phone + password for a token
//! - POST /api/customers/token/validate - Resolve a token to a customer id
//!
//! The two token endpoints answer failures with a JSON body
//! (`{"status":"fail","reason":...}`) instead of a bare reason phrase.

use crate::{
    AppState,
    error::{AppError, TokenFailure},
    handlers::customers::json_body,
    models::{
        customer::{Customer, SaveCustomerRequest},
        token::{TokenRequest, TokenResponse, ValidateTokenRequest, ValidateTokenResponse},
    },
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

/// Register a new customer.
///
/// Always inserts: any `id` in the body is ignored. The password is hashed
/// before it is stored.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "id": 1,
///   "name": "A",
///   "phone": "111",
///   "active": true,
///   "created": "2025-12-20T10:00:00Z"
/// }
/// ```
pub async fn register_customer(
    State(state): State<AppState>,
    body: Result<Json<SaveCustomerRequest>, JsonRejection>,
) -> Result<Json<Customer>, AppError> {
    let request = SaveCustomerRequest {
        id: 0,
        ..json_body(body)?
    };
    Ok(Json(state.customers.save(request).await?))
}

/// Issue a customer token.
///
/// # Request Body
///
/// ```json
/// { "login": "111", "password": "pw" }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: `{"status":"ok","token":"<512 hex chars>"}`
/// - **Error (400)**: `{"status":"fail","reason":"invalid credentials"}`
/// - **Error (500)**: `{"status":"fail","reason":"internal error"}`
pub async fn issue_token(
    State(state): State<AppState>,
    body: Result<Json<TokenRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, TokenFailure> {
    let Ok(Json(request)) = body else {
        return Err(TokenFailure::bad_request());
    };

    match state
        .auth
        .token_for_customer(&request.login, &request.password)
        .await
    {
        Ok(token) => Ok(Json(TokenResponse {
            status: "ok",
            token,
        })),
        Err(AppError::NoSuchUser | AppError::InvalidPassword) => Err(TokenFailure::new(
            StatusCode::BAD_REQUEST,
            "invalid credentials",
        )),
        Err(_) => Err(TokenFailure::internal()),
    }
}

/// Validate a customer token.
///
/// # Request Body
///
/// ```json
/// { "token": "<token>" }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: `{"status":"ok","customerId":1}`
/// - **Error (404)**: `{"status":"fail","reason":"not found"}`
/// - **Error (400)**: `{"status":"fail","reason":"expired"}`
pub async fn validate_token(
    State(state): State<AppState>,
    body: Result<Json<ValidateTokenRequest>, JsonRejection>,
) -> Result<Json<ValidateTokenResponse>, TokenFailure> {
    let Ok(Json(request)) = body else {
        return Err(TokenFailure::bad_request());
    };

    match state.auth.authenticate_customer(&request.token).await {
        Ok(customer_id) => Ok(Json(ValidateTokenResponse {
            status: "ok",
            customer_id,
        })),
        Err(AppError::NoSuchUser) => Err(TokenFailure::new(StatusCode::NOT_FOUND, "not found")),
        Err(AppError::TokenExpired) => Err(TokenFailure::new(StatusCode::BAD_REQUEST, "expired")),
        Err(_) => Err(TokenFailure::internal()),
    }
}
