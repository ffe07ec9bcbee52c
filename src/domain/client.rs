use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{ChildrenCount, ClientId};

/// A catalogued client.
///
/// `id` is `None` only until the record is first persisted; the store assigns
/// it on insert and it never changes afterwards.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: Option<ClientId>,
    pub name: String,
    /// National tax id. Kept verbatim, no checksum validation.
    pub cpf: String,
    pub income: f64,
    pub birth_date: DateTime<Utc>,
    pub children: ChildrenCount,
}

impl Client {
    /// Builds a client that has not been persisted yet.
    #[must_use]
    pub fn new(
        name: String,
        cpf: String,
        income: f64,
        birth_date: DateTime<Utc>,
        children: ChildrenCount,
    ) -> Self {
        Self {
            id: None,
            name,
            cpf,
            income,
            birth_date,
            children,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn new_client_has_no_identity() {
        let client = Client::new(
            "Maria".to_string(),
            "12345678900".to_string(),
            1500.0,
            Utc.with_ymd_and_hms(1996, 12, 23, 0, 0, 0).unwrap(),
            ChildrenCount::new(1).unwrap(),
        );

        assert!(client.is_new());
    }
}
