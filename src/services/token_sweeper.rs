//! Background removal of expired customer tokens.
//!
//! Token validation never deletes anything, so without this task the token
//! table only grows. The sweep is optional and only removes rows that
//! `authenticate_customer` would already reject as expired.

use crate::{error::AppError, store::Store};
use chrono::Utc;
use std::{sync::Arc, time::Duration};
use tokio::{task::JoinHandle, time::MissedTickBehavior};

/// Delete every token that expired before now.
pub async fn sweep_expired_tokens(store: &dyn Store) -> Result<u64, AppError> {
    Ok(store.delete_expired_tokens(Utc::now()).await?)
}

/// Run [`sweep_expired_tokens`] every `period` until the runtime shuts down.
/// A failed sweep is logged and retried on the next tick.
pub fn spawn_token_sweeper(store: Arc<dyn Store>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            match sweep_expired_tokens(store.as_ref()).await {
                Ok(0) => tracing::debug!("no expired tokens to sweep"),
                Ok(removed) => tracing::info!(removed, "swept expired customer tokens"),
                Err(err) => tracing::warn!(error = %err, "expired token sweep failed"),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn sweep_removes_only_expired_tokens() {
        let expired = MemoryStore::new().with_token_ttl(chrono::Duration::seconds(-5));
        expired.insert_token("old", 1).await.unwrap();
        assert_eq!(sweep_expired_tokens(&expired).await.unwrap(), 1);
        assert_eq!(expired.token_count().await, 0);

        let live = MemoryStore::new();
        live.insert_token("fresh", 1).await.unwrap();
        assert_eq!(sweep_expired_tokens(&live).await.unwrap(), 0);
        assert_eq!(live.token_count().await, 1);
    }

    #[tokio::test]
    async fn spawned_sweeper_runs_on_first_tick() {
        let store = Arc::new(MemoryStore::new().with_token_ttl(chrono::Duration::seconds(-5)));
        store.insert_token("old", 1).await.unwrap();

        let handle = spawn_token_sweeper(store.clone(), Duration::from_secs(3600));
        // The first tick of an interval completes immediately.
        for _ in 0..50 {
            if store.token_count().await == 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        handle.abort();

        assert_eq!(store.token_count().await, 0);
    }
}
