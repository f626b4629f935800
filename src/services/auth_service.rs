//! Authentication service.
//!
//! Two independent credential paths live here:
//! - managers, checked on every administrative request via Basic-auth
//! - customers, who trade phone + password for an opaque bearer token
//!
//! Tokens are 256 bytes from the OS random source, hex-encoded. The store
//! assigns their expiry; this service only compares it against the clock.
//! Tokens are never refreshed or deleted here.

use crate::{
    error::AppError,
    middleware::basic::Authorizer,
    models::token::TOKEN_BYTES,
    services::password,
    store::Store,
};
use async_trait::async_trait;
use chrono::Utc;
use rand::{TryRngCore, rngs::OsRng};
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn Store>,
}

impl AuthService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Check manager credentials.
    ///
    /// True iff exactly one manager row matches both login and password.
    /// Any store failure counts as a rejection.
    // TODO: hash manager passwords (managers.password is plaintext) and compare
    // through password::verify_password like customer logins do.
    pub async fn auth(&self, login: &str, password: &str) -> bool {
        match self.store.count_managers(login, password).await {
            Ok(count) => count == 1,
            Err(err) => {
                tracing::warn!(error = %err, "manager lookup failed, rejecting credentials");
                false
            }
        }
    }

    /// Issue a new token for the customer registered under `login` (phone).
    ///
    /// # Errors
    ///
    /// - `NoSuchUser`: no customer with that phone
    /// - `InvalidPassword`: password does not match the stored hash
    /// - `Internal`: store or randomness failure
    pub async fn token_for_customer(&self, login: &str, password: &str) -> Result<String, AppError> {
        let Some(credentials) = self.store.customer_credentials(login).await? else {
            // Same hashing cost as a wrong password; keeps registered phones
            // indistinguishable by response time.
            password::verify_against_dummy(password.to_string()).await?;
            return Err(AppError::NoSuchUser);
        };

        if !password::verify_password(password.to_string(), credentials.password).await? {
            return Err(AppError::InvalidPassword);
        }

        let token = generate_token()?;
        self.store
            .insert_token(&token, credentials.id)
            .await
            .map_err(|err| {
                tracing::error!(error = %err, customer_id = credentials.id, "failed to persist token");
                AppError::Internal
            })?;

        tracing::info!(customer_id = credentials.id, "issued customer token");
        Ok(token)
    }

    /// Resolve a token to the customer id it was issued for.
    ///
    /// # Errors
    ///
    /// - `NoSuchUser`: unknown token
    /// - `TokenExpired`: the current time is past the recorded expiry
    /// - `Internal`: store failure
    pub async fn authenticate_customer(&self, token: &str) -> Result<i64, AppError> {
        let record = self
            .store
            .token_record(token)
            .await?
            .ok_or(AppError::NoSuchUser)?;

        if record.is_expired_at(Utc::now()) {
            return Err(AppError::TokenExpired);
        }

        Ok(record.customer_id)
    }
}

#[async_trait]
impl Authorizer for AuthService {
    async fn authorize(&self, login: &str, password: &str) -> bool {
        self.auth(login, password).await
    }
}

/// Generate a fresh hex token from `TOKEN_BYTES` random bytes.
pub fn generate_token() -> Result<String, AppError> {
    let mut buffer = [0u8; TOKEN_BYTES];
    OsRng.try_fill_bytes(&mut buffer).map_err(|err| {
        tracing::error!(error = %err, "random source unavailable");
        AppError::Internal
    })?;

    Ok(hex::encode(buffer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{customer::NewCustomer, token::TOKEN_HEX_LEN},
        store::MemoryStore,
    };
    use chrono::Duration;

    async fn store_with_customer(store: MemoryStore, phone: &str, password: &str) -> Arc<MemoryStore> {
        let store = Arc::new(store);
        let hash = password::hash_password(password.to_string()).await.unwrap();
        store
            .insert_customer(NewCustomer {
                name: "A".to_string(),
                phone: phone.to_string(),
                password_hash: hash,
            })
            .await
            .unwrap();
        store
    }

    #[test]
    fn tokens_are_fixed_length_hex() {
        let token = generate_token().unwrap();

        assert_eq!(token.len(), TOKEN_HEX_LEN);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(hex::decode(&token).unwrap().len(), TOKEN_BYTES);
    }

    #[test]
    fn tokens_do_not_repeat() {
        assert_ne!(generate_token().unwrap(), generate_token().unwrap());
    }

    #[tokio::test]
    async fn manager_auth_requires_exact_match() {
        let service = AuthService::new(Arc::new(MemoryStore::new().with_manager("admin", "pass")));

        assert!(service.auth("admin", "pass").await);
        assert!(!service.auth("admin", "Pass").await);
        assert!(!service.auth("root", "pass").await);
    }

    #[tokio::test]
    async fn token_round_trip_resolves_customer() {
        let store = store_with_customer(MemoryStore::new(), "111", "pw").await;
        let service = AuthService::new(store);

        let token = service.token_for_customer("111", "pw").await.unwrap();
        let customer_id = service.authenticate_customer(&token).await.unwrap();

        assert_eq!(customer_id, 1);
    }

    #[tokio::test]
    async fn each_login_issues_a_distinct_live_token() {
        let store = store_with_customer(MemoryStore::new(), "111", "pw").await;
        let service = AuthService::new(store.clone());

        let first = service.token_for_customer("111", "pw").await.unwrap();
        let second = service.token_for_customer("111", "pw").await.unwrap();

        assert_ne!(first, second);
        assert_eq!(store.token_count().await, 2);
        assert!(service.authenticate_customer(&first).await.is_ok());
        assert!(service.authenticate_customer(&second).await.is_ok());
    }

    #[tokio::test]
    async fn unknown_phone_is_no_such_user() {
        let service = AuthService::new(Arc::new(MemoryStore::new()));

        let err = service.token_for_customer("999", "pw").await.unwrap_err();
        assert!(matches!(err, AppError::NoSuchUser));
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let store = store_with_customer(MemoryStore::new(), "111", "pw").await;
        let service = AuthService::new(store.clone());

        let err = service.token_for_customer("111", "nope").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidPassword));
        assert_eq!(store.token_count().await, 0);
    }

    #[tokio::test]
    async fn unknown_phone_costs_a_password_verification() {
        let store = store_with_customer(MemoryStore::new(), "111", "pw").await;
        let service = AuthService::new(store);

        // Warm the dummy hash so only verification time is compared.
        let _ = service.token_for_customer("000", "pw").await;

        let started = std::time::Instant::now();
        let _ = service.token_for_customer("111", "wrong").await;
        let wrong_password = started.elapsed();

        let started = std::time::Instant::now();
        let err = service.token_for_customer("999", "wrong").await.unwrap_err();
        let unknown_phone = started.elapsed();

        assert!(matches!(err, AppError::NoSuchUser));
        assert!(
            unknown_phone * 4 >= wrong_password,
            "unknown phone answered in {unknown_phone:?}, wrong password in {wrong_password:?}"
        );
    }

    #[tokio::test]
    async fn unknown_token_is_no_such_user() {
        let service = AuthService::new(Arc::new(MemoryStore::new()));

        let err = service.authenticate_customer("deadbeef").await.unwrap_err();
        assert!(matches!(err, AppError::NoSuchUser));
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let store = MemoryStore::new().with_token_ttl(Duration::seconds(-1));
        let store = store_with_customer(store, "111", "pw").await;
        let service = AuthService::new(store);

        let token = service.token_for_customer("111", "pw").await.unwrap();
        let err = service.authenticate_customer(&token).await.unwrap_err();

        assert!(matches!(err, AppError::TokenExpired));
    }
}
