//! Reference client data set used for seeding and tests.

use chrono::{TimeZone, Utc};

use crate::dto::client::ClientDto;

/// (name, cpf, income, (year, month, day, hour, minute), children)
type Row = (&'static str, &'static str, f64, (i32, u32, u32, u32, u32), i32);

const ROWS: [Row; 12] = [
    ("Conceição Evaristo", "10619244881", 1500.0, (2020, 7, 13, 20, 50), 2),
    ("Lázaro Ramos", "10619244881", 2500.0, (1996, 12, 23, 0, 0), 2),
    ("Clarice Lispector", "10919444522", 3800.0, (1960, 4, 13, 7, 50), 2),
    ("Carolina Maria de Jesus", "10419244771", 7500.0, (1996, 12, 23, 7, 0), 0),
    ("Gilberto Gil", "10419344882", 2500.0, (1949, 5, 5, 7, 0), 4),
    ("Djamila Ribeiro", "10619244884", 4500.0, (1975, 11, 10, 7, 0), 1),
    ("Jorge Amado", "10219344681", 1500.0, (1918, 11, 30, 7, 0), 0),
    ("Toni Morrison", "10219344681", 10000.0, (1940, 2, 23, 7, 0), 0),
    ("Maria", "10114274861", 1500.0, (1956, 9, 23, 7, 0), 2),
    ("Silvio Almeida", "10164334861", 4500.0, (1976, 7, 3, 7, 0), 3),
    ("Sueli Carneiro", "10164334821", 5000.0, (1950, 6, 18, 7, 0), 1),
    ("Ibrahim Lincoln", "10176334823", 1650.0, (1945, 5, 18, 7, 0), 0),
];

/// The twelve reference clients, in insertion order.
///
/// Five earn at least 4000.0, two were born in 1996 (one at exactly
/// 1996-12-23T00:00:00Z), nobody was born in 1997 and exactly one is named
/// "Maria".
pub fn sample_clients() -> Vec<ClientDto> {
    ROWS.iter()
        .filter_map(|&(name, cpf, income, (y, mo, d, h, mi), children)| {
            let birth_date = Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).single()?;
            Some(ClientDto {
                id: None,
                name: name.to_string(),
                cpf: cpf.to_string(),
                income,
                birth_date,
                children,
            })
        })
        .collect()
}
