//! Customer service - CRUD over the customer store.
//!
//! Plaintext passwords stop here: `save` hashes them before anything is
//! handed to the store.

use crate::{
    error::AppError,
    models::customer::{Customer, CustomerUpdate, NewCustomer, SaveCustomerRequest},
    services::password,
    store::Store,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct CustomerService {
    store: Arc<dyn Store>,
}

impl CustomerService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn by_id(&self, id: i64) -> Result<Customer, AppError> {
        self.store
            .customer_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// All customers, oldest first. Empty when there are none.
    pub async fn all(&self) -> Result<Vec<Customer>, AppError> {
        Ok(self.store.all_customers().await?)
    }

    pub async fn all_active(&self) -> Result<Vec<Customer>, AppError> {
        Ok(self.store.active_customers().await?)
    }

    /// Create (`id == 0`) or update (`id != 0`) a customer.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest`: a required field is empty
    /// - `NotFound`: update of an unknown id
    /// - `Conflict`: the phone belongs to another customer
    /// - `Internal`: store failure
    pub async fn save(&self, request: SaveCustomerRequest) -> Result<Customer, AppError> {
        if request.name.trim().is_empty() || request.phone.trim().is_empty() {
            return Err(AppError::InvalidRequest(
                "name and phone are required".to_string(),
            ));
        }

        if request.id == 0 {
            return self.insert(request).await;
        }

        let password_hash = if request.password.is_empty() {
            None
        } else {
            Some(password::hash_password(request.password).await?)
        };

        let updated = self
            .store
            .update_customer(CustomerUpdate {
                id: request.id,
                name: request.name,
                phone: request.phone,
                password_hash,
                active: request.active,
            })
            .await?
            .ok_or(AppError::NotFound)?;

        tracing::info!(customer_id = updated.id, "customer updated");
        Ok(updated)
    }

    async fn insert(&self, request: SaveCustomerRequest) -> Result<Customer, AppError> {
        if request.password.is_empty() {
            return Err(AppError::InvalidRequest("password is required".to_string()));
        }

        let password_hash = password::hash_password(request.password).await?;
        let customer = self
            .store
            .insert_customer(NewCustomer {
                name: request.name,
                phone: request.phone,
                password_hash,
            })
            .await?;

        tracing::info!(customer_id = customer.id, "customer created");
        Ok(customer)
    }

    /// Delete a customer, returning the deleted row.
    pub async fn remove_by_id(&self, id: i64) -> Result<Customer, AppError> {
        let removed = self
            .store
            .remove_customer(id)
            .await?
            .ok_or(AppError::NotFound)?;

        tracing::info!(customer_id = id, "customer removed");
        Ok(removed)
    }

    pub async fn block_by_id(&self, id: i64) -> Result<Customer, AppError> {
        self.set_active(id, false).await
    }

    pub async fn unblock_by_id(&self, id: i64) -> Result<Customer, AppError> {
        self.set_active(id, true).await
    }

    async fn set_active(&self, id: i64, active: bool) -> Result<Customer, AppError> {
        self.store
            .set_customer_active(id, active)
            .await?
            .ok_or(AppError::NotFound)
    }
}
