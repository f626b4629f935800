//! PostgreSQL store backed by sqlx.
//!
//! Every query runs under `tokio::time::timeout`. If the request that issued
//! it is dropped (client went away), the query future is dropped with it.

use super::Store;
use crate::{
    db::DbPool,
    error::StoreError,
    models::{
        customer::{Customer, CustomerUpdate, NewCustomer},
        token::{CustomerCredentials, TokenRecord},
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::{future::Future, time::Duration};

const CUSTOMER_COLUMNS: &str = "id, name, phone, password, active, created";

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
    query_timeout: Duration,
}

impl PgStore {
    pub fn new(pool: DbPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    /// Run a query future under the configured deadline.
    async fn timed<T, F>(&self, query: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        tokio::time::timeout(self.query_timeout, query)
            .await
            .map_err(|_| StoreError::Timeout(self.query_timeout))?
            .map_err(StoreError::from)
    }

    async fn customers_where(&self, filter: &str) -> Result<Vec<Customer>, StoreError> {
        let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM customers {filter} ORDER BY id");
        self.timed(sqlx::query_as::<_, Customer>(&sql).fetch_all(&self.pool))
            .await
    }
}

#[async_trait]
impl Store for PgStore {
    async fn customer_by_id(&self, id: i64) -> Result<Option<Customer>, StoreError> {
        let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1");
        self.timed(
            sqlx::query_as::<_, Customer>(&sql)
                .bind(id)
                .fetch_optional(&self.pool),
        )
        .await
    }

    async fn all_customers(&self) -> Result<Vec<Customer>, StoreError> {
        self.customers_where("").await
    }

    async fn active_customers(&self) -> Result<Vec<Customer>, StoreError> {
        self.customers_where("WHERE active").await
    }

    async fn insert_customer(&self, customer: NewCustomer) -> Result<Customer, StoreError> {
        let sql = format!(
            "INSERT INTO customers (name, phone, password) VALUES ($1, $2, $3) RETURNING {CUSTOMER_COLUMNS}"
        );
        self.timed(
            sqlx::query_as::<_, Customer>(&sql)
                .bind(customer.name)
                .bind(customer.phone)
                .bind(customer.password_hash)
                .fetch_one(&self.pool),
        )
        .await
    }

    async fn update_customer(
        &self,
        update: CustomerUpdate,
    ) -> Result<Option<Customer>, StoreError> {
        let sql = format!(
            r#"
            UPDATE customers
            SET name = $2,
                phone = $3,
                password = COALESCE($4, password),
                active = COALESCE($5, active)
            WHERE id = $1
            RETURNING {CUSTOMER_COLUMNS}
            "#
        );
        self.timed(
            sqlx::query_as::<_, Customer>(&sql)
                .bind(update.id)
                .bind(update.name)
                .bind(update.phone)
                .bind(update.password_hash)
                .bind(update.active)
                .fetch_optional(&self.pool),
        )
        .await
    }

    async fn remove_customer(&self, id: i64) -> Result<Option<Customer>, StoreError> {
        let sql = format!("DELETE FROM customers WHERE id = $1 RETURNING {CUSTOMER_COLUMNS}");
        self.timed(
            sqlx::query_as::<_, Customer>(&sql)
                .bind(id)
                .fetch_optional(&self.pool),
        )
        .await
    }

    async fn set_customer_active(
        &self,
        id: i64,
        active: bool,
    ) -> Result<Option<Customer>, StoreError> {
        let sql =
            format!("UPDATE customers SET active = $2 WHERE id = $1 RETURNING {CUSTOMER_COLUMNS}");
        self.timed(
            sqlx::query_as::<_, Customer>(&sql)
                .bind(id)
                .bind(active)
                .fetch_optional(&self.pool),
        )
        .await
    }

    async fn count_managers(&self, login: &str, password: &str) -> Result<i64, StoreError> {
        self.timed(
            sqlx::query_scalar("SELECT COUNT(*) FROM managers WHERE login = $1 AND password = $2")
                .bind(login)
                .bind(password)
                .fetch_one(&self.pool),
        )
        .await
    }

    async fn customer_credentials(
        &self,
        phone: &str,
    ) -> Result<Option<CustomerCredentials>, StoreError> {
        self.timed(
            sqlx::query_as::<_, CustomerCredentials>(
                "SELECT id, password FROM customers WHERE phone = $1",
            )
            .bind(phone)
            .fetch_optional(&self.pool),
        )
        .await
    }

    async fn insert_token(&self, token: &str, customer_id: i64) -> Result<(), StoreError> {
        self.timed(
            sqlx::query("INSERT INTO customers_tokens (token, customer_id) VALUES ($1, $2)")
                .bind(token)
                .bind(customer_id)
                .execute(&self.pool),
        )
        .await?;
        Ok(())
    }

    async fn token_record(&self, token: &str) -> Result<Option<TokenRecord>, StoreError> {
        self.timed(
            sqlx::query_as::<_, TokenRecord>(
                "SELECT customer_id, expire FROM customers_tokens WHERE token = $1",
            )
            .bind(token)
            .fetch_optional(&self.pool),
        )
        .await
    }

    async fn delete_expired_tokens(&self, now: DateTime<Utc>) -> Result<u64, StoreError> {
        let result = self
            .timed(
                sqlx::query("DELETE FROM customers_tokens WHERE expire < $1")
                    .bind(now)
                    .execute(&self.pool),
            )
            .await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.timed(sqlx::query("SELECT 1").execute(&self.pool))
            .await?;
        Ok(())
    }
}
