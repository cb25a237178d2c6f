//! Data access layer for the food-donation tracker.
//!
//! Every operation acquires a pooled connection, runs one statement and
//! returns the connection to the pool on every exit path. Failures come back
//! as [`DataError`] so callers can tell a missing row from an unreachable
//! database without inspecting message text.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod access;
pub mod config;
pub mod error;
pub mod models;
pub mod reports;
pub mod repositories;
pub mod schema;
pub mod seed;
pub mod views;

pub use access::{run_query, run_statement, SqlParam};
pub use config::DbConfig;
pub use error::{DataError, DataResult};
pub use schema::ensure_schema;
pub use seed::seed_sample_data;
pub use views::{load_view, View};

pub type DbPool = sqlx::PgPool;

/// Open a connection pool against the configured database.
///
/// Any failure (bad credentials, unreachable host, malformed URL) is
/// reported as [`DataError::Connection`].
pub async fn connect(config: &DbConfig) -> DataResult<DbPool> {
    let options = config.connect_options()?;
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_with(options)
        .await
        .map_err(|e| {
            tracing::error!(
                db = %config.redacted_target(),
                error = %e,
                "Database connection failed"
            );
            DataError::Connection(e.to_string())
        })?;
    tracing::info!(db = %config.redacted_target(), "Database connection pool created");
    Ok(pool)
}

/// Build a pool that connects on first use instead of up front.
///
/// Useful when the service should start (and report itself degraded)
/// while the database is still unreachable.
pub fn connect_lazy(config: &DbConfig) -> DataResult<DbPool> {
    let options = config.connect_options()?;
    Ok(PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_lazy_with(options))
}

/// Run a trivial query to confirm the database answers.
pub async fn health_check(pool: &DbPool) -> DataResult<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
