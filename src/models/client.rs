use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::client::Client as DomainClient;
use crate::domain::types::{ChildrenCount, ClientId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::clients)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::client::Client`].
pub struct Client {
    pub id: i32,
    pub name: String,
    pub cpf: String,
    pub income: f64,
    /// Birth instant stored as naive UTC.
    pub birth_date: NaiveDateTime,
    pub children: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clients)]
/// Insertable form of [`Client`].
pub struct NewClient<'a> {
    pub name: &'a str,
    pub cpf: &'a str,
    pub income: f64,
    pub birth_date: NaiveDateTime,
    pub children: i32,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::clients)]
/// Full replacement of every mutable column of a [`Client`] record.
pub struct UpdateClient<'a> {
    pub name: &'a str,
    pub cpf: &'a str,
    pub income: f64,
    pub birth_date: NaiveDateTime,
    pub children: i32,
}

impl TryFrom<Client> for DomainClient {
    type Error = TypeConstraintError;

    fn try_from(client: Client) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(ClientId::new(client.id)?),
            name: client.name,
            cpf: client.cpf,
            income: client.income,
            birth_date: client.birth_date.and_utc(),
            children: ChildrenCount::new(client.children)?,
        })
    }
}

impl<'a> From<&'a DomainClient> for NewClient<'a> {
    fn from(client: &'a DomainClient) -> Self {
        Self {
            name: client.name.as_str(),
            cpf: client.cpf.as_str(),
            income: client.income,
            birth_date: client.birth_date.naive_utc(),
            children: client.children.get(),
        }
    }
}

impl<'a> From<&'a DomainClient> for UpdateClient<'a> {
    fn from(client: &'a DomainClient) -> Self {
        Self {
            name: client.name.as_str(),
            cpf: client.cpf.as_str(),
            income: client.income,
            birth_date: client.birth_date.naive_utc(),
            children: client.children.get(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::*;

    fn sample_domain() -> DomainClient {
        DomainClient::new(
            "Maria".to_string(),
            "10619244881".to_string(),
            4500.0,
            Utc.with_ymd_and_hms(1996, 12, 23, 0, 0, 0).unwrap(),
            ChildrenCount::new(2).unwrap(),
        )
    }

    #[test]
    fn from_domain_creates_newclient() {
        let domain = sample_domain();
        let new: NewClient = (&domain).into();
        assert_eq!(new.name, "Maria");
        assert_eq!(new.cpf, "10619244881");
        assert_eq!(new.income, 4500.0);
        assert_eq!(new.birth_date, domain.birth_date.naive_utc());
        assert_eq!(new.children, 2);
    }

    #[test]
    fn from_domain_creates_updateclient() {
        let domain = sample_domain();
        let update: UpdateClient = (&domain).into();
        assert_eq!(update.name, domain.name);
        assert_eq!(update.cpf, domain.cpf);
        assert_eq!(update.children, domain.children.get());
    }

    #[test]
    fn client_into_domain() {
        let birth = NaiveDate::from_ymd_opt(1975, 11, 10)
            .unwrap()
            .and_hms_opt(7, 0, 0)
            .unwrap();
        let db_client = Client {
            id: 6,
            name: "n".to_string(),
            cpf: "c".to_string(),
            income: 4500.0,
            birth_date: birth,
            children: 1,
        };
        let domain = DomainClient::try_from(db_client).unwrap();
        assert_eq!(domain.id, Some(ClientId::new(6).unwrap()));
        assert_eq!(domain.name, "n");
        assert_eq!(domain.cpf, "c");
        assert_eq!(domain.birth_date, Utc.with_ymd_and_hms(1975, 11, 10, 7, 0, 0).unwrap());
        assert_eq!(domain.children.get(), 1);
    }

    #[test]
    fn negative_children_row_is_rejected() {
        let db_client = Client {
            id: 1,
            name: "n".to_string(),
            cpf: "c".to_string(),
            income: 1.0,
            birth_date: NaiveDate::from_ymd_opt(2000, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            children: -1,
        };
        assert_eq!(
            DomainClient::try_from(db_client),
            Err(TypeConstraintError::NegativeCount)
        );
    }
}
