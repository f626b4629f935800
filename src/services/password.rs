//! Customer password hashing.
//!
//! Hashes are salted argon2 PHC strings produced by `password-auth`, which
//! also performs the constant-time comparison on verify. Both operations are
//! CPU-bound and run on the blocking pool.

use crate::error::AppError;
use tokio::sync::OnceCell;

/// Hash verified against when a login does not exist, so that a miss costs
/// the same argon2 work as a wrong password.
static DUMMY_HASH: OnceCell<String> = OnceCell::const_new();

pub async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || password_auth::generate_hash(password))
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "password hashing task failed");
            AppError::Internal
        })
}

/// `Ok(false)` for a wrong password or an unparsable stored hash.
pub async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || password_auth::verify_password(password, &hash).is_ok())
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "password verification task failed");
            AppError::Internal
        })
}

/// Run a full verification that always fails. Used for unknown logins.
pub async fn verify_against_dummy(password: String) -> Result<bool, AppError> {
    let hash = DUMMY_HASH
        .get_or_try_init(|| hash_password("dummy-password-never-matches".to_string()))
        .await?;
    verify_password(password, hash.clone()).await?;
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_is_salted_and_verifies() {
        let first = hash_password("pw".to_string()).await.unwrap();
        let second = hash_password("pw".to_string()).await.unwrap();

        assert_ne!(first, second);
        assert!(verify_password("pw".to_string(), first.clone()).await.unwrap());
        assert!(!verify_password("other".to_string(), first).await.unwrap());
    }

    #[tokio::test]
    async fn garbage_hash_does_not_verify() {
        let ok = verify_password("pw".to_string(), "not-a-hash".to_string())
            .await
            .unwrap();
        assert!(!ok);
    }

    #[tokio::test]
    async fn dummy_verification_does_real_work_and_never_matches() {
        assert!(
            !verify_against_dummy("dummy-password-never-matches".to_string())
                .await
                .unwrap()
        );

        let hash = DUMMY_HASH.get().unwrap();
        assert!(hash.starts_with("$argon2"));
    }
}
