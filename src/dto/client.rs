//! Boundary representation of a client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::client::Client;
use crate::domain::types::{ChildrenCount, TypeConstraintError, ensure_finite_income};

/// Client as seen by callers of the service layer.
///
/// `id` is ignored on the write path; the store assigns it on insert and the
/// path id wins on update.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientDto {
    pub id: Option<i32>,
    pub name: String,
    pub cpf: String,
    pub income: f64,
    pub birth_date: DateTime<Utc>,
    pub children: i32,
}

impl ClientDto {
    /// Overwrites every mutable field of `entity` with this DTO's values,
    /// leaving its id alone.
    pub fn copy_onto(&self, entity: &mut Client) -> Result<(), TypeConstraintError> {
        let children = ChildrenCount::new(self.children)?;
        let income = ensure_finite_income(self.income)?;

        entity.name = self.name.clone();
        entity.cpf = self.cpf.clone();
        entity.income = income;
        entity.birth_date = self.birth_date;
        entity.children = children;
        Ok(())
    }
}

impl From<Client> for ClientDto {
    fn from(client: Client) -> Self {
        Self {
            id: client.id.map(i32::from),
            name: client.name,
            cpf: client.cpf,
            income: client.income,
            birth_date: client.birth_date,
            children: client.children.get(),
        }
    }
}

impl TryFrom<&ClientDto> for Client {
    type Error = TypeConstraintError;

    /// Builds an unsaved entity; the DTO id is dropped.
    fn try_from(dto: &ClientDto) -> Result<Self, Self::Error> {
        Ok(Client::new(
            dto.name.clone(),
            dto.cpf.clone(),
            ensure_finite_income(dto.income)?,
            dto.birth_date,
            ChildrenCount::new(dto.children)?,
        ))
    }
}
