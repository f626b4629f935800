//! Customer data models and API request types.
//!
//! This module defines:
//! - `Customer`: Database entity representing a customer
//! - `SaveCustomerRequest`: Request body for creating or updating customers
//! - `NewCustomer` / `CustomerUpdate`: what the service hands to the store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents a customer record from the database.
///
/// # Database Table
///
/// Maps to the `customers` table. `id` and `created` are assigned by the
/// store on insert and never change afterwards. `phone` is the login.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize)]
pub struct Customer {
    pub id: i64,

    pub name: String,

    /// External login identifier (unique).
    pub phone: String,

    /// Salted password hash. Never serialized.
    #[serde(skip_serializing)]
    pub password: String,

    /// Blocked customers have `active = false`.
    pub active: bool,

    pub created: DateTime<Utc>,
}

/// Request body for saving a customer.
///
/// # JSON Example
///
/// ```json
/// {
///   "name": "Alice",
///   "phone": "992000000001",
///   "password": "secret"
/// }
/// ```
///
/// An absent or zero `id` creates a new customer. A non-zero `id` updates
/// the existing one; in that case an empty `password` keeps the stored hash
/// and an absent `active` keeps the current flag.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveCustomerRequest {
    #[serde(default)]
    pub id: i64,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub phone: String,

    /// Plaintext password; hashed before it reaches the store.
    #[serde(default)]
    pub password: String,

    #[serde(default)]
    pub active: Option<bool>,
}

/// Insert payload. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub phone: String,
    pub password_hash: String,
}

/// Update payload for an existing customer.
#[derive(Debug, Clone)]
pub struct CustomerUpdate {
    pub id: i64,
    pub name: String,
    pub phone: String,
    /// `None` keeps the stored hash.
    pub password_hash: Option<String>,
    /// `None` keeps the current flag.
    pub active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_is_not_serialized() {
        let customer = Customer {
            id: 7,
            name: "A".to_string(),
            phone: "111".to_string(),
            password: "$argon2id$v=19$...".to_string(),
            active: true,
            created: Utc::now(),
        };

        let value = serde_json::to_value(&customer).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["active"], true);
        assert!(value.get("password").is_none());
        assert!(value.get("created").is_some());
    }

    #[test]
    fn save_request_defaults_to_insert() {
        let request: SaveCustomerRequest =
            serde_json::from_str(r#"{"name":"A","phone":"111","password":"pw"}"#).unwrap();

        assert_eq!(request.id, 0);
        assert_eq!(request.active, None);
    }
}
