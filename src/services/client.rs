//! Client catalog workflows: lookups, insert, merge-update and delete.

use chrono::{DateTime, Utc};

use crate::domain::client::Client;
use crate::domain::types::ClientId;
use crate::dto::client::ClientDto;
use crate::pagination::{Page, PageRequest};
use crate::repository::errors::RepositoryError;
use crate::repository::{ClientReader, ClientWriter, Transactional};
use crate::services::{ServiceError, ServiceResult};

/// Ids that can never be assigned are reported as missing.
fn existing_id(id: i32) -> ServiceResult<ClientId> {
    ClientId::new(id).map_err(|_| ServiceError::ResourceNotFound(id))
}

/// Lists every client ordered by id.
pub fn find_all_clients<R>(repo: &R) -> ServiceResult<Vec<ClientDto>>
where
    R: ClientReader + ?Sized,
{
    let clients = repo.find_all_clients().map_err(|err| {
        log::error!("Failed to list clients: {err}");
        err
    })?;

    Ok(clients.into_iter().map(ClientDto::from).collect())
}

/// Returns one page of clients with the store's paging metadata.
pub fn find_all_clients_paged<R>(repo: &R, page: PageRequest) -> ServiceResult<Page<ClientDto>>
where
    R: ClientReader + ?Sized,
{
    let clients = repo.find_all_clients_paged(page).map_err(|err| {
        log::error!("Failed to list client page: {err}");
        err
    })?;

    Ok(clients.map(ClientDto::from))
}

pub fn find_client_by_id<R>(repo: &R, id: i32) -> ServiceResult<ClientDto>
where
    R: ClientReader + ?Sized,
{
    let client_id = existing_id(id)?;

    repo.find_client_by_id(client_id)?
        .map(ClientDto::from)
        .ok_or(ServiceError::ResourceNotFound(id))
}

pub fn count_clients<R>(repo: &R) -> ServiceResult<usize>
where
    R: ClientReader + ?Sized,
{
    Ok(repo.count_clients()?)
}

/// Pages through clients earning at least `income`.
pub fn find_clients_by_income<R>(
    repo: &R,
    income: f64,
    page: PageRequest,
) -> ServiceResult<Page<ClientDto>>
where
    R: ClientReader + ?Sized,
{
    let clients = repo.find_clients_by_income(income, page).map_err(|err| {
        log::error!("Failed to filter clients by income {income}: {err}");
        err
    })?;

    Ok(clients.map(ClientDto::from))
}

pub fn find_clients_by_name<R>(repo: &R, name: &str) -> ServiceResult<Vec<ClientDto>>
where
    R: ClientReader + ?Sized,
{
    let clients = repo.find_clients_by_name_ignore_case(name).map_err(|err| {
        log::error!("Failed to find clients named {name:?}: {err}");
        err
    })?;
    Ok(clients.into_iter().map(ClientDto::from).collect())
}

/// Clients born at exactly `birth_date` or anywhere in its calendar year.
///
/// This is year matching, not birthday matching: the same month and day in a
/// different year does not match.
pub fn find_clients_by_birth_date_or_year<R>(
    repo: &R,
    birth_date: DateTime<Utc>,
) -> ServiceResult<Vec<ClientDto>>
where
    R: ClientReader + ?Sized,
{
    let clients = repo
        .find_clients_by_birth_date_or_year(birth_date)
        .map_err(|err| {
            log::error!("Failed to find clients born on or in the year of {birth_date}: {err}");
            err
        })?;
    Ok(clients.into_iter().map(ClientDto::from).collect())
}

/// Persists a new client built from `dto`, ignoring any id it carries.
pub fn insert_client<R>(repo: &R, dto: &ClientDto) -> ServiceResult<ClientDto>
where
    R: ClientWriter + Transactional + ?Sized,
{
    let entity = Client::try_from(dto)?;

    repo.transaction(|| -> ServiceResult<ClientDto> {
        let saved = repo.save_client(&entity).map_err(|err| {
            log::error!("Failed to insert client: {err}");
            err
        })?;
        Ok(ClientDto::from(saved))
    })
}

/// Replaces every field of client `id` except the id itself.
///
/// The client is loaded first so a missing id fails before any write.
pub fn update_client<R>(repo: &R, id: i32, dto: &ClientDto) -> ServiceResult<ClientDto>
where
    R: ClientReader + ClientWriter + Transactional + ?Sized,
{
    let client_id = existing_id(id)?;

    repo.transaction(|| -> ServiceResult<ClientDto> {
        let mut entity = repo
            .find_client_by_id(client_id)?
            .ok_or(ServiceError::ResourceNotFound(id))?;

        dto.copy_onto(&mut entity)?;

        let saved = repo.save_client(&entity).map_err(|err| match err {
            RepositoryError::EntityNotFound(_) => ServiceError::ResourceNotFound(id),
            other => {
                log::error!("Failed to update client {id}: {other}");
                ServiceError::from(other)
            }
        })?;

        Ok(ClientDto::from(saved))
    })
}

pub fn delete_client<R>(repo: &R, id: i32) -> ServiceResult<()>
where
    R: ClientWriter + Transactional + ?Sized,
{
    let client_id = existing_id(id)?;

    repo.transaction(|| -> ServiceResult<()> {
        repo.delete_client_by_id(client_id).map_err(|err| match err {
            RepositoryError::EmptyResult(_) => ServiceError::ResourceNotFound(id),
            other => {
                log::error!("Failed to delete client {id}: {other}");
                ServiceError::DatabaseIntegrityViolation
            }
        })
    })
}
