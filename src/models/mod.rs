//! Database models and configuration shared across the catalog.

pub mod client;
pub mod config;
