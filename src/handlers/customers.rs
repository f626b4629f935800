//! Customer management HTTP handlers (administrative, Basic-auth gated).
//!
//! This module implements the legacy customer endpoints:
//! - GET /customers - List all customers
//! - POST /customers - Create or update a customer
//! - GET /customers/active - List active customers
//! - GET /customers/{id} - Get customer by ID
//! - DELETE /customers/{id} - Delete customer
//! - POST /customers/{id}/block - Block customer
//! - DELETE /customers/{id}/block - Unblock customer

use crate::{
    AppState,
    error::AppError,
    models::customer::{Customer, SaveCustomerRequest},
};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};

/// Extract a numeric customer id from the path, or 400.
pub(crate) fn customer_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    path.map(|Path(id)| id).map_err(|rejection| {
        tracing::debug!(error = %rejection, "invalid customer id");
        AppError::InvalidRequest(rejection.body_text())
    })
}

/// Unwrap a JSON body, or 400.
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(value)| value).map_err(|rejection| {
        tracing::debug!(error = %rejection, "invalid request body");
        AppError::InvalidRequest(rejection.body_text())
    })
}

/// List all customers.
///
/// # Response
///
/// - **Success (200 OK)**: array of customers (may be empty)
///
/// ```json
/// [
///   {
///     "id": 1,
///     "name": "Alice",
///     "phone": "992000000001",
///     "active": true,
///     "created": "2025-12-20T10:00:00Z"
///   }
/// ]
/// ```
pub async fn get_all_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<Customer>>, AppError> {
    Ok(Json(state.customers.all().await?))
}

/// List customers whose `active` flag is set.
pub async fn get_all_active_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<Customer>>, AppError> {
    Ok(Json(state.customers.all_active().await?))
}

/// Get a single customer.
///
/// # Response
///
/// - **Success (200 OK)**: the customer
/// - **Error (400)**: id is not an integer
/// - **Error (404)**: no such customer
pub async fn get_customer_by_id(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Customer>, AppError> {
    let id = customer_id(path)?;
    Ok(Json(state.customers.by_id(id).await?))
}

/// Create or update a customer.
///
/// # Request Body
///
/// ```json
/// {
///   "id": 0,
///   "name": "Alice",
///   "phone": "992000000001",
///   "password": "secret"
/// }
/// ```
///
/// `id` 0 (or absent) inserts; any other id updates that customer.
///
/// # Response
///
/// - **Success (200 OK)**: the saved customer
/// - **Error (400)**: malformed body or missing fields
/// - **Error (404)**: update of an unknown id
/// - **Error (409)**: phone already registered
pub async fn save_customer(
    State(state): State<AppState>,
    body: Result<Json<SaveCustomerRequest>, JsonRejection>,
) -> Result<Json<Customer>, AppError> {
    let request = json_body(body)?;
    Ok(Json(state.customers.save(request).await?))
}

/// Delete a customer and return the deleted row.
pub async fn remove_customer_by_id(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Customer>, AppError> {
    let id = customer_id(path)?;
    Ok(Json(state.customers.remove_by_id(id).await?))
}

/// Block a customer (`active = false`).
pub async fn block_customer_by_id(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Customer>, AppError> {
    let id = customer_id(path)?;
    Ok(Json(state.customers.block_by_id(id).await?))
}

/// Unblock a customer (`active = true`).
pub async fn unblock_customer_by_id(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Customer>, AppError> {
    let id = customer_id(path)?;
    Ok(Json(state.customers.unblock_by_id(id).await?))
}
