//! Customers Service
//!
//! A REST API for managing customer records (create, list, fetch, delete,
//! block/unblock) with token-based customer authentication and Basic-auth
//! protected administrative endpoints.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx, behind the [`store::Store`] trait
//! - **Administrative auth**: HTTP Basic against the `managers` table
//! - **Customer auth**: argon2 password hashes, 512-char hex bearer tokens
//! - **Format**: JSON requests/responses

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

pub use config::Config;
pub use error::{AppError, StoreError};
pub use routes::router;

use services::{auth_service::AuthService, customer_service::CustomerService};
use std::sync::Arc;
use store::Store;

/// Application state shared across all handlers.
///
/// Every service holds the same store handle; nothing else is shared.
#[derive(Clone)]
pub struct AppState {
    pub customers: CustomerService,
    pub auth: AuthService,
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            customers: CustomerService::new(store.clone()),
            auth: AuthService::new(store.clone()),
            store,
        }
    }
}
