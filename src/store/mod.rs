//! Persistence layer.
//!
//! [`Store`] is the explicit handle every service is constructed with. All
//! mutable state lives behind it; services keep nothing in process memory, so
//! concurrency control is the backing store's job (row locks / MVCC for
//! PostgreSQL, an async `RwLock` for the in-memory store).

use crate::{
    error::StoreError,
    models::{
        customer::{Customer, CustomerUpdate, NewCustomer},
        token::{CustomerCredentials, TokenRecord},
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Data access for customers, managers and customer tokens.
///
/// Lookups that can miss return `Ok(None)`; it is up to the caller to decide
/// which error kind a miss becomes.
#[async_trait]
pub trait Store: Send + Sync + 'static {
    async fn customer_by_id(&self, id: i64) -> Result<Option<Customer>, StoreError>;

    async fn all_customers(&self) -> Result<Vec<Customer>, StoreError>;

    async fn active_customers(&self) -> Result<Vec<Customer>, StoreError>;

    /// Insert a customer; the store assigns `id`, `active = true` and `created`.
    async fn insert_customer(&self, customer: NewCustomer) -> Result<Customer, StoreError>;

    async fn update_customer(&self, update: CustomerUpdate)
    -> Result<Option<Customer>, StoreError>;

    /// Delete a customer (and its tokens), returning the deleted row.
    async fn remove_customer(&self, id: i64) -> Result<Option<Customer>, StoreError>;

    async fn set_customer_active(
        &self,
        id: i64,
        active: bool,
    ) -> Result<Option<Customer>, StoreError>;

    /// Number of managers whose login and password both match exactly.
    async fn count_managers(&self, login: &str, password: &str) -> Result<i64, StoreError>;

    async fn customer_credentials(
        &self,
        phone: &str,
    ) -> Result<Option<CustomerCredentials>, StoreError>;

    /// Persist a token for a customer. The store assigns the expiry.
    async fn insert_token(&self, token: &str, customer_id: i64) -> Result<(), StoreError>;

    async fn token_record(&self, token: &str) -> Result<Option<TokenRecord>, StoreError>;

    /// Delete tokens whose expiry is before `now`, returning how many were removed.
    async fn delete_expired_tokens(&self, now: DateTime<Utc>) -> Result<u64, StoreError>;

    /// Cheap connectivity check.
    async fn ping(&self) -> Result<(), StoreError>;
}
