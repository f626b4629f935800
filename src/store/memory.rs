//! In-memory store.
//!
//! Mirrors the PostgreSQL schema closely enough to run the full service
//! without a database: unique phones, store-assigned ids and timestamps,
//! token expiry set on insert, token removal when a customer is deleted.

use super::Store;
use crate::{
    error::StoreError,
    models::{
        customer::{Customer, CustomerUpdate, NewCustomer},
        token::{CustomerCredentials, TokenRecord},
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    next_id: i64,
    customers: BTreeMap<i64, Customer>,
    managers: HashMap<String, String>,
    tokens: HashMap<String, TokenRecord>,
}

pub struct MemoryStore {
    tables: RwLock<Tables>,
    token_ttl: Duration,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Same one-hour token lifetime as the `customers_tokens` column default.
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            token_ttl: Duration::hours(1),
        }
    }

    /// Lifetime assigned to tokens inserted from now on. A negative value
    /// issues tokens that are already expired.
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Seed a manager account for Basic-auth.
    pub fn with_manager(mut self, login: impl Into<String>, password: impl Into<String>) -> Self {
        self.tables
            .get_mut()
            .managers
            .insert(login.into(), password.into());
        self
    }

    pub async fn token_count(&self) -> usize {
        self.tables.read().await.tokens.len()
    }
}

fn phone_taken(tables: &Tables, phone: &str, except: Option<i64>) -> bool {
    tables
        .customers
        .values()
        .any(|c| c.phone == phone && Some(c.id) != except)
}

#[async_trait]
impl Store for MemoryStore {
    async fn customer_by_id(&self, id: i64) -> Result<Option<Customer>, StoreError> {
        Ok(self.tables.read().await.customers.get(&id).cloned())
    }

    async fn all_customers(&self) -> Result<Vec<Customer>, StoreError> {
        Ok(self.tables.read().await.customers.values().cloned().collect())
    }

    async fn active_customers(&self) -> Result<Vec<Customer>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .customers
            .values()
            .filter(|c| c.active)
            .cloned()
            .collect())
    }

    async fn insert_customer(&self, customer: NewCustomer) -> Result<Customer, StoreError> {
        let mut tables = self.tables.write().await;
        if phone_taken(&tables, &customer.phone, None) {
            return Err(StoreError::Conflict);
        }

        tables.next_id += 1;
        let row = Customer {
            id: tables.next_id,
            name: customer.name,
            phone: customer.phone,
            password: customer.password_hash,
            active: true,
            created: Utc::now(),
        };
        tables.customers.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_customer(
        &self,
        update: CustomerUpdate,
    ) -> Result<Option<Customer>, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.customers.contains_key(&update.id) {
            return Ok(None);
        }
        if phone_taken(&tables, &update.phone, Some(update.id)) {
            return Err(StoreError::Conflict);
        }

        let Some(row) = tables.customers.get_mut(&update.id) else {
            return Ok(None);
        };
        row.name = update.name;
        row.phone = update.phone;
        if let Some(hash) = update.password_hash {
            row.password = hash;
        }
        if let Some(active) = update.active {
            row.active = active;
        }
        Ok(Some(row.clone()))
    }

    async fn remove_customer(&self, id: i64) -> Result<Option<Customer>, StoreError> {
        let mut tables = self.tables.write().await;
        let removed = tables.customers.remove(&id);
        if removed.is_some() {
            tables.tokens.retain(|_, record| record.customer_id != id);
        }
        Ok(removed)
    }

    async fn set_customer_active(
        &self,
        id: i64,
        active: bool,
    ) -> Result<Option<Customer>, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables.customers.get_mut(&id).map(|row| {
            row.active = active;
            row.clone()
        }))
    }

    async fn count_managers(&self, login: &str, password: &str) -> Result<i64, StoreError> {
        let tables = self.tables.read().await;
        let matched = tables
            .managers
            .get(login)
            .is_some_and(|stored| stored == password);
        Ok(i64::from(matched))
    }

    async fn customer_credentials(
        &self,
        phone: &str,
    ) -> Result<Option<CustomerCredentials>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .customers
            .values()
            .find(|c| c.phone == phone)
            .map(|c| CustomerCredentials {
                id: c.id,
                password: c.password.clone(),
            }))
    }

    async fn insert_token(&self, token: &str, customer_id: i64) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if tables.tokens.contains_key(token) {
            return Err(StoreError::Conflict);
        }

        let record = TokenRecord {
            customer_id,
            expire: Utc::now() + self.token_ttl,
        };
        tables.tokens.insert(token.to_string(), record);
        Ok(())
    }

    async fn token_record(&self, token: &str) -> Result<Option<TokenRecord>, StoreError> {
        Ok(self.tables.read().await.tokens.get(token).cloned())
    }

    async fn delete_expired_tokens(&self, now: DateTime<Utc>) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.tokens.len();
        tables.tokens.retain(|_, record| record.expire >= now);
        Ok((before - tables.tokens.len()) as u64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
