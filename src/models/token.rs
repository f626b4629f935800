//! Customer token models.
//!
//! Tokens are opaque bearer strings: 256 random bytes, hex-encoded. They are
//! stored in `customers_tokens` with an expiry the store assigns on insert.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of random bytes behind every token.
pub const TOKEN_BYTES: usize = 256;

/// Length of the hex-encoded token string.
pub const TOKEN_HEX_LEN: usize = TOKEN_BYTES * 2;

/// The (customer_id, expire) pair stored for a token.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct TokenRecord {
    pub customer_id: i64,
    pub expire: DateTime<Utc>,
}

impl TokenRecord {
    /// A token stays valid up to and including its recorded expiry instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expire
    }
}

/// What the store returns when looking a customer up by login.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CustomerCredentials {
    pub id: i64,
    /// Salted password hash.
    pub password: String,
}

/// Request body for `POST /api/customers/token`.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    /// Customer phone.
    pub login: String,
    pub password: String,
}

/// Successful response for `POST /api/customers/token`.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub status: &'static str,
    pub token: String,
}

/// Request body for `POST /api/customers/token/validate`.
#[derive(Debug, Deserialize)]
pub struct ValidateTokenRequest {
    pub token: String,
}

/// Successful response for `POST /api/customers/token/validate`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateTokenResponse {
    pub status: &'static str,
    pub customer_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn expiry_uses_timestamp_comparison() {
        let now = Utc::now();
        let record = TokenRecord {
            customer_id: 1,
            expire: now,
        };

        assert!(!record.is_expired_at(now));
        assert!(!record.is_expired_at(now - Duration::hours(1)));
        assert!(record.is_expired_at(now + Duration::milliseconds(1)));
    }

    #[test]
    fn validate_response_uses_camel_case() {
        let body = serde_json::to_value(ValidateTokenResponse {
            status: "ok",
            customer_id: 42,
        })
        .unwrap();

        assert_eq!(body, serde_json::json!({"status": "ok", "customerId": 42}));
    }
}
