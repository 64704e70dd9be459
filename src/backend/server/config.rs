/**
 * Database Setup
 *
 * This module opens the SQLite connection pool described by
 * `DatabaseSettings` and applies the schema in `migrations/`.
 *
 * # Pool Settings
 *
 * The pool is capped at `max_connections` and each connection is recycled
 * after `max_lifetime`. Foreign keys are enabled on every connection.
 *
 * File databases run in WAL mode so readers never wait on the writer.
 * Writers serialize through [`begin_write`], which takes the write lock up
 * front; a connection waits up to `BUSY_TIMEOUT` for that lock.
 */

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::shared::config::DatabaseSettings;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open the connection pool
///
/// Database files are created if they do not exist yet.
pub async fn load_database(settings: &DatabaseSettings) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!("Connecting to database...");

    let options = SqliteConnectOptions::from_str(&settings.url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .max_lifetime(settings.max_lifetime())
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_with(options)
        .await?;

    tracing::info!(
        "Database connection pool created (max {} connections)",
        settings.max_connections
    );
    Ok(pool)
}

/// Begin a transaction that holds the database write lock from its first statement
///
/// A deferred transaction that reads before writing cannot upgrade its lock
/// while another writer is active, and SQLite fails it with `SQLITE_BUSY`
/// without consulting the busy timeout. `BEGIN IMMEDIATE` waits instead.
pub async fn begin_write(pool: &SqlitePool) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
    pool.begin_with("BEGIN IMMEDIATE").await
}

/// Apply pending migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!()
        .run(pool)
        .await
        .map_err(|e| sqlx::Error::Migrate(Box::new(e)))?;
    tracing::info!("Database migrations completed successfully");
    Ok(())
}

/// Single-connection in-memory pool with the schema applied
///
/// An in-memory database lives as long as its connection, so the pool keeps
/// exactly one and never recycles it.
pub async fn memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;
    Ok(pool)
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    memory_pool().await.expect("in-memory database")
}
