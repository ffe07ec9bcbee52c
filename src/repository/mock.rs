//! Mock repository implementations for isolating services in tests.

use chrono::{DateTime, Utc};
use mockall::mock;

use crate::domain::client::Client;
use crate::domain::types::ClientId;
use crate::pagination::{Page, PageRequest};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ClientReader, ClientWriter, Transactional};

mock! {
    pub Repository {}

    impl ClientReader for Repository {
        fn find_all_clients(&self) -> RepositoryResult<Vec<Client>>;
        fn find_all_clients_paged(&self, page: PageRequest) -> RepositoryResult<Page<Client>>;
        fn find_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
        fn count_clients(&self) -> RepositoryResult<usize>;
        fn find_clients_by_income(
            &self,
            income: f64,
            page: PageRequest,
        ) -> RepositoryResult<Page<Client>>;
        fn find_clients_by_name_ignore_case(&self, name: &str) -> RepositoryResult<Vec<Client>>;
        fn find_clients_by_birth_date_or_year(
            &self,
            birth_date: DateTime<Utc>,
        ) -> RepositoryResult<Vec<Client>>;
    }

    impl ClientWriter for Repository {
        fn save_client(&self, client: &Client) -> RepositoryResult<Client>;
        fn delete_client_by_id(&self, id: ClientId) -> RepositoryResult<()>;
    }
}

/// Mocks have no backend to scope, so the closure simply runs.
impl Transactional for MockRepository {
    fn transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<RepositoryError>,
    {
        f()
    }
}
