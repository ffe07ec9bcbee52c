//! Repository implementation for catalog clients.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    db::unicode_lower,
    domain::{client::Client, types::ClientId},
    models::client::{
        Client as DbClient, NewClient as DbNewClient, UpdateClient as DbUpdateClient,
    },
    pagination::{Direction, Page, PageRequest, Sort, SortField},
    repository::{
        ClientReader, ClientWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::clients,
};

/// Orders a boxed client query, always finishing with ascending id so that
/// paging is deterministic.
fn ordered(
    query: clients::BoxedQuery<'_, Sqlite>,
    sort: Option<Sort>,
) -> clients::BoxedQuery<'_, Sqlite> {
    let Some(Sort { field, direction }) = sort else {
        return query.order_by(clients::id.asc());
    };

    let query = match (field, direction) {
        (SortField::Id, Direction::Asc) => query.order_by(clients::id.asc()),
        (SortField::Id, Direction::Desc) => query.order_by(clients::id.desc()),
        (SortField::Name, Direction::Asc) => query.order_by(clients::name.asc()),
        (SortField::Name, Direction::Desc) => query.order_by(clients::name.desc()),
        (SortField::Cpf, Direction::Asc) => query.order_by(clients::cpf.asc()),
        (SortField::Cpf, Direction::Desc) => query.order_by(clients::cpf.desc()),
        (SortField::Income, Direction::Asc) => query.order_by(clients::income.asc()),
        (SortField::Income, Direction::Desc) => query.order_by(clients::income.desc()),
        (SortField::BirthDate, Direction::Asc) => query.order_by(clients::birth_date.asc()),
        (SortField::BirthDate, Direction::Desc) => query.order_by(clients::birth_date.desc()),
        (SortField::Children, Direction::Asc) => query.order_by(clients::children.asc()),
        (SortField::Children, Direction::Desc) => query.order_by(clients::children.desc()),
    };

    query.then_order_by(clients::id.asc())
}

fn into_domain(rows: Vec<DbClient>) -> RepositoryResult<Vec<Client>> {
    rows.into_iter()
        .map(|row| Client::try_from(row).map_err(RepositoryError::from))
        .collect()
}

/// First and one-past-last instants of a UTC calendar year.
fn year_bounds(year: i32) -> RepositoryResult<(NaiveDateTime, NaiveDateTime)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| RepositoryError::ValidationError(format!("Year out of range: {year}")))?;
    let end = NaiveDate::from_ymd_opt(year + 1, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or(NaiveDateTime::MAX);

    Ok((start, end))
}

impl ClientReader for DieselRepository {
    fn find_all_clients(&self) -> RepositoryResult<Vec<Client>> {
        self.with_conn(|conn| {
            let rows = clients::table
                .order(clients::id.asc())
                .load::<DbClient>(conn)?;

            into_domain(rows)
        })
    }

    fn find_all_clients_paged(&self, page: PageRequest) -> RepositoryResult<Page<Client>> {
        self.with_conn(|conn| {
            let total: i64 = clients::table.count().get_result(conn)?;

            let rows = ordered(clients::table.into_boxed(), page.sort)
                .limit(page.limit())
                .offset(page.offset())
                .load::<DbClient>(conn)?;

            Ok(Page::new(into_domain(rows)?, &page, total as usize))
        })
    }

    fn find_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>> {
        self.with_conn(|conn| {
            let row = clients::table
                .find(id.get())
                .first::<DbClient>(conn)
                .optional()?;

            match row {
                Some(row) => Ok(Some(Client::try_from(row).map_err(RepositoryError::from)?)),
                None => Ok(None),
            }
        })
    }

    fn count_clients(&self) -> RepositoryResult<usize> {
        self.with_conn(|conn| {
            let total: i64 = clients::table.count().get_result(conn)?;
            Ok(total as usize)
        })
    }

    fn find_clients_by_income(
        &self,
        income: f64,
        page: PageRequest,
    ) -> RepositoryResult<Page<Client>> {
        self.with_conn(|conn| {
            let total: i64 = clients::table
                .filter(clients::income.ge(income))
                .count()
                .get_result(conn)?;

            let query = clients::table
                .filter(clients::income.ge(income))
                .into_boxed();
            let rows = ordered(query, page.sort)
                .limit(page.limit())
                .offset(page.offset())
                .load::<DbClient>(conn)?;

            Ok(Page::new(into_domain(rows)?, &page, total as usize))
        })
    }

    fn find_clients_by_name_ignore_case(&self, name: &str) -> RepositoryResult<Vec<Client>> {
        self.with_conn(|conn| {
            let rows = clients::table
                .filter(unicode_lower(clients::name).eq(unicode_lower(name)))
                .order(clients::id.asc())
                .load::<DbClient>(conn)?;

            into_domain(rows)
        })
    }

    fn find_clients_by_birth_date_or_year(
        &self,
        birth_date: DateTime<Utc>,
    ) -> RepositoryResult<Vec<Client>> {
        let instant = birth_date.naive_utc();
        let (year_start, next_year_start) = year_bounds(birth_date.year())?;

        self.with_conn(|conn| {
            let rows = clients::table
                .filter(
                    clients::birth_date.eq(instant).or(clients::birth_date
                        .ge(year_start)
                        .and(clients::birth_date.lt(next_year_start))),
                )
                .order(clients::id.asc())
                .load::<DbClient>(conn)?;

            into_domain(rows)
        })
    }
}

impl ClientWriter for DieselRepository {
    fn save_client(&self, client: &Client) -> RepositoryResult<Client> {
        self.with_conn(|conn| {
            let row = match client.id {
                None => {
                    let new_client: DbNewClient = client.into();
                    diesel::insert_into(clients::table)
                        .values(&new_client)
                        .get_result::<DbClient>(conn)?
                }
                Some(id) => {
                    let updates: DbUpdateClient = client.into();
                    diesel::update(clients::table.find(id.get()))
                        .set(&updates)
                        .get_result::<DbClient>(conn)
                        .optional()?
                        .ok_or(RepositoryError::EntityNotFound(id))?
                }
            };

            Client::try_from(row).map_err(RepositoryError::from)
        })
    }

    fn delete_client_by_id(&self, id: ClientId) -> RepositoryResult<()> {
        self.with_conn(|conn| {
            let affected = diesel::delete(clients::table.find(id.get())).execute(conn)?;
            if affected == 0 {
                return Err(RepositoryError::EmptyResult(id));
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_bounds_cover_the_whole_year() {
        let (start, end) = year_bounds(1996).unwrap();
        assert_eq!(start.to_string(), "1996-01-01 00:00:00");
        assert_eq!(end.to_string(), "1997-01-01 00:00:00");
    }
}
