use tempfile::TempDir;

use client_catalog::db::{DbPool, establish_connection_pool, run_migrations};
use client_catalog::domain::client::Client;
use client_catalog::fixtures::sample_clients;
use client_catalog::repository::{ClientWriter, DieselRepository};

/// Migrated SQLite database living in a temporary directory.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let pool = establish_connection_pool(path.to_str().expect("utf-8 path"))
            .expect("create pool");
        run_migrations(&pool).expect("run migrations");

        Self { _dir: dir, pool }
    }

    /// Same as [`TestDb::new`] with the twelve reference clients inserted,
    /// receiving ids 1 through 12.
    #[allow(dead_code)]
    pub fn seeded(name: &str) -> Self {
        let test_db = Self::new(name);
        let repo = test_db.repo();
        for dto in sample_clients() {
            let client = Client::try_from(&dto).expect("valid fixture row");
            repo.save_client(&client).expect("insert fixture row");
        }
        test_db
    }

    #[allow(dead_code)]
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    #[allow(dead_code)]
    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool.clone())
    }
}
