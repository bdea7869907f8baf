//! Database initialization and migration runner.
//!
//! SYSTEM CONTEXT
//! ==============
//! Startup uses this module to create the shared SQLx pool and enforce schema
//! migrations before accepting API traffic. Pool sizing is tunable through
//! `DB_MAX_CONNECTIONS` and `DB_ACQUIRE_TIMEOUT_SECS`; bad values fall back
//! to the defaults rather than aborting startup.

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

fn parse_max_connections(raw: Option<&str>) -> u32 {
    raw.and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_MAX_CONNECTIONS)
}

fn parse_acquire_timeout(raw: Option<&str>) -> Duration {
    let secs = raw
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_ACQUIRE_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

/// Initialize the `PostgreSQL` connection pool and run migrations.
///
/// # Errors
///
/// Returns an error if the connection or migrations fail.
pub async fn init_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let max_connections = parse_max_connections(std::env::var("DB_MAX_CONNECTIONS").ok().as_deref());
    let acquire_timeout =
        parse_acquire_timeout(std::env::var("DB_ACQUIRE_TIMEOUT_SECS").ok().as_deref());

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect(database_url)
        .await?;

    sqlx::migrate!("src/db/migrations").run(&pool).await?;
    tracing::info!(max_connections, "database ready, migrations applied");

    Ok(pool)
}

#[cfg(test)]
#[path = "db_test.rs"]
mod tests;
