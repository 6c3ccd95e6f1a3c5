//! Async database connection pool implementation.
//!
//! Uses the bb8 connection pool manager with diesel_async for PostgreSQL.
//! The pool is constructed once in the process entry point and injected
//! through `AppState`; there is no global client singleton.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::config::DatabaseConfig;
use crate::error::AppError;

/// Async connection pool type alias.
///
/// bb8::Pool uses `Arc` internally, so Clone is cheap and structures holding
/// an `AsyncDbPool` can derive Clone without extra wrapping.
pub type AsyncDbPool = Pool<AsyncPgConnection>;

/// A connection checked out of the pool.
pub type DbConnection<'a> = PooledConnection<'a, AsyncPgConnection>;

/// Embedded SQL migrations, compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Creates the async database connection pool from configuration.
pub async fn establish_async_connection_pool(
    config: &DatabaseConfig,
) -> Result<AsyncDbPool, AppError> {
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.url.clone());
    let pool = Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(config.min_connections))
        .connection_timeout(Duration::from_secs(config.connection_timeout))
        .build(manager)
        .await
        .map_err(|e| AppError::ConnectionPool {
            source: anyhow::Error::new(e),
        })?;
    Ok(pool)
}

/// Runs all pending migrations against the configured database.
///
/// The migration harness is synchronous, so this establishes a blocking
/// `PgConnection` on a blocking thread rather than going through the async
/// pool.
pub async fn run_migrations(database_url: &str) -> Result<(), AppError> {
    let url = database_url.to_string();
    tokio::task::spawn_blocking(move || -> Result<usize, anyhow::Error> {
        use diesel::{Connection, PgConnection};

        let mut conn = PgConnection::establish(&url)?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| anyhow::anyhow!("migration failed: {e}"))?;
        Ok(applied.len())
    })
    .await
    .map_err(|e| AppError::Internal {
        source: anyhow::Error::new(e),
    })?
    .map(|count| {
        tracing::info!(applied = count, "Migrations applied");
    })
    .map_err(AppError::from)
}
