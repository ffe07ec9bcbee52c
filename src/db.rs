//! Database connection helpers.
//!
//! This module provides a small wrapper around the Diesel connection pool,
//! utilities to establish a connection to the SQLite database backing the
//! client catalog and the embedded schema migrations.

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError, PooledConnection};
use diesel::sql_types::Text;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use log::error;

use crate::repository::errors::{RepositoryError, RepositoryResult};

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

// SQLite's built-in `lower()` only folds ASCII letters.
diesel::define_sql_function! {
    /// Unicode-aware lowercasing, registered on every pooled connection.
    fn unicode_lower(x: Text) -> Text;
}

#[derive(Debug)]
/// Options that are applied each time a connection is acquired from the pool.
pub struct ConnectionOptions {
    /// Enable Write Ahead Logging mode for SQLite.
    pub enable_wal: bool,
    /// Enforce foreign key checks for SQLite.
    pub enable_foreign_keys: bool,
    /// Timeout to wait for a locked database.
    pub busy_timeout: Option<Duration>,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        (|| {
            if self.enable_wal {
                conn.batch_execute("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;")?;
            }
            if self.enable_foreign_keys {
                conn.batch_execute("PRAGMA foreign_keys = ON;")?;
            }
            if let Some(d) = self.busy_timeout {
                conn.batch_execute(&format!("PRAGMA busy_timeout = {};", d.as_millis()))?;
            }
            unicode_lower_utils::register_impl(conn, |x: String| x.to_lowercase())?;
            Ok(())
        })()
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Create a Diesel connection pool for the given database URL.
pub fn establish_connection_pool(database_url: &str) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .connection_customizer(Box::new(ConnectionOptions {
            enable_wal: true,
            enable_foreign_keys: true,
            busy_timeout: Some(Duration::from_secs(30)),
        }))
        .build(manager)
}

/// Retrieve a connection from the pool
pub fn get_connection(pool: &DbPool) -> Result<DbConnection, PoolError> {
    match pool.get() {
        Ok(conn) => Ok(conn),
        Err(e) => {
            error!("Failed to get connection from pool: {e}");
            Err(e)
        }
    }
}

/// Apply every pending embedded migration, returning how many ran.
pub fn run_migrations(pool: &DbPool) -> RepositoryResult<usize> {
    let mut pooled = get_connection(pool)?;
    let conn: &mut SqliteConnection = &mut pooled;
    let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
        error!("Failed to run migrations: {e}");
        RepositoryError::DatabaseError(format!("Migration error: {e}"))
    })?;

    Ok(applied.len())
}
