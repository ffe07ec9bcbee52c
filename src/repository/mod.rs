use std::cell::RefCell;

use chrono::{DateTime, Utc};
use diesel::connection::{AnsiTransactionManager, TransactionManager};
use diesel::sqlite::SqliteConnection;

use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::client::Client;
use crate::domain::types::ClientId;
use crate::pagination::{Page, PageRequest};
use crate::repository::errors::{RepositoryError, RepositoryResult};

pub mod client;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

/// Read side of the client store.
pub trait ClientReader {
    fn find_all_clients(&self) -> RepositoryResult<Vec<Client>>;
    fn find_all_clients_paged(&self, page: PageRequest) -> RepositoryResult<Page<Client>>;
    fn find_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
    fn count_clients(&self) -> RepositoryResult<usize>;
    /// Clients whose income is at least `income`.
    fn find_clients_by_income(
        &self,
        income: f64,
        page: PageRequest,
    ) -> RepositoryResult<Page<Client>>;
    /// Exact, case-insensitive name match. An empty name only matches empty names.
    fn find_clients_by_name_ignore_case(&self, name: &str) -> RepositoryResult<Vec<Client>>;
    /// Clients born exactly at `birth_date` or at any time in the same UTC year.
    fn find_clients_by_birth_date_or_year(
        &self,
        birth_date: DateTime<Utc>,
    ) -> RepositoryResult<Vec<Client>>;
}

/// Write side of the client store.
pub trait ClientWriter {
    /// Inserts the client when it has no id yet, otherwise replaces the stored
    /// row. Replacing a row that is gone fails with
    /// [`RepositoryError::EntityNotFound`].
    fn save_client(&self, client: &Client) -> RepositoryResult<Client>;
    /// Fails with [`RepositoryError::EmptyResult`] when no row was removed.
    fn delete_client_by_id(&self, id: ClientId) -> RepositoryResult<()>;
}

/// Runs a group of store calls atomically.
pub trait Transactional {
    /// Commits when `f` returns `Ok`, rolls back otherwise. Calls made while a
    /// transaction is already open join it.
    fn transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<RepositoryError>;
}

/// Diesel-backed store.
///
/// Clones share the connection pool but not the open transaction, so each
/// caller or thread should work on its own clone.
pub struct DieselRepository {
    pool: DbPool,
    pinned: RefCell<Option<DbConnection>>,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            pinned: RefCell::new(None),
        }
    }

    /// Runs `f` on the connection of the open transaction, or on a fresh
    /// pooled connection when none is open.
    fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        F: FnOnce(&mut SqliteConnection) -> RepositoryResult<T>,
    {
        if let Some(conn) = self.pinned.borrow_mut().as_mut() {
            return f(&mut **conn);
        }

        let mut conn = get_connection(&self.pool)?;
        f(&mut *conn)
    }
}

impl Clone for DieselRepository {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

/// Puts the pinned connection back into the pool when the transaction scope
/// ends, rolling back whatever is still open (early return or unwind).
struct TransactionScope<'a> {
    slot: &'a RefCell<Option<DbConnection>>,
}

impl TransactionScope<'_> {
    fn release(self) -> Option<DbConnection> {
        self.slot.borrow_mut().take()
    }
}

impl Drop for TransactionScope<'_> {
    fn drop(&mut self) {
        if let Some(mut conn) = self.slot.borrow_mut().take() {
            let conn: &mut SqliteConnection = &mut conn;
            if let Err(e) = AnsiTransactionManager::rollback_transaction(conn) {
                log::error!("Failed to roll back abandoned transaction: {e}");
            }
        }
    }
}

impl Transactional for DieselRepository {
    fn transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<RepositoryError>,
    {
        if self.pinned.borrow().is_some() {
            return f();
        }

        let mut conn = get_connection(&self.pool).map_err(RepositoryError::from)?;
        {
            let conn: &mut SqliteConnection = &mut conn;
            AnsiTransactionManager::begin_transaction(conn).map_err(RepositoryError::from)?;
        }
        *self.pinned.borrow_mut() = Some(conn);

        let scope = TransactionScope { slot: &self.pinned };
        let result = f();
        let Some(mut conn) = scope.release() else {
            return Err(RepositoryError::DatabaseError(
                "Transaction connection was lost".to_string(),
            )
            .into());
        };
        let conn: &mut SqliteConnection = &mut conn;

        match result {
            Ok(value) => {
                AnsiTransactionManager::commit_transaction(conn).map_err(RepositoryError::from)?;
                Ok(value)
            }
            Err(err) => {
                if let Err(e) = AnsiTransactionManager::rollback_transaction(conn) {
                    log::error!("Failed to roll back transaction: {e}");
                }
                Err(err)
            }
        }
    }
}
