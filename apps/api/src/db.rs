use std::time::Duration;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates a lazily connected PostgreSQL pool for the salary warehouse.
///
/// No connection is opened here, so an unreachable warehouse does not stop
/// startup; each query acquires a connection within `acquire_timeout`.
pub fn create_lazy_pool(database_url: &str, acquire_timeout: Duration) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .min_connections(0)
        .acquire_timeout(acquire_timeout)
        .connect_lazy(database_url)?;

    info!("Salary warehouse pool configured (lazy)");
    Ok(pool)
}
