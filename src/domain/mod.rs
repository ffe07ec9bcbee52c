//! Domain aggregates exposed by the catalog service layer.

pub mod client;
pub mod types;
