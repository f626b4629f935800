//! Customers Service - Main Application Entry Point
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool
//! 3. Run database migrations
//! 4. Start the expired-token sweep if configured
//! 5. Build HTTP router with routes and middleware
//! 6. Start server on configured address

use customers_service::{AppState, Config, db, router, services::token_sweeper, store::PgStore};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    let pool = db::create_pool(&config).await?;
    tracing::info!("Database pool created");

    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    let store = Arc::new(PgStore::new(pool, config.query_timeout()));

    tracing::warn!("manager passwords are compared in plaintext; migrate managers to hashed passwords");

    if let Some(period) = config.token_sweep_interval() {
        token_sweeper::spawn_token_sweeper(store.clone(), period);
        tracing::info!(?period, "Expired token sweep enabled");
    }

    let app = router(AppState::new(store));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Each connection is served concurrently on the tokio runtime
    axum::serve(listener, app).await?;

    Ok(())
}
