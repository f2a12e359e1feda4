use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::SqlitePool;

/// How long a connection waits on SQLite's file lock before giving up.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(10);

/// Pool size for file-backed databases. WAL lets readers run beside the
/// single writer.
const MAX_CONNECTIONS: u32 = 8;

/// Create a connection pool from a database URL such as
/// `sqlite://cardclaim.db` or `sqlite::memory:`.
///
/// The database file is created if missing.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT);

    pool_options(database_url).connect_with(options).await
}

/// Pool sizing for `database_url`.
///
/// An in-memory database lives and dies with its connection, so it gets
/// exactly one that is never reaped for idleness or age.
fn pool_options(database_url: &str) -> SqlitePoolOptions {
    if database_url.contains(":memory:") {
        tracing::debug!("Opening in-memory SQLite pool");
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        tracing::debug!(max_connections = MAX_CONNECTIONS, "Opening SQLite pool");
        SqlitePoolOptions::new().max_connections(MAX_CONNECTIONS)
    }
}

/// Round-trip a trivial query to prove the database answers.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations in `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
