//! Client catalog: persistence and service layer for client records.
//!
//! Callers use the functions in [`services::client`], which work on
//! [`dto::client::ClientDto`] values and talk to any store implementing the
//! [`repository`] traits. [`repository::DieselRepository`] is the SQLite
//! implementation.

pub mod db;
pub mod domain;
pub mod dto;
pub mod error_conversions;
pub mod fixtures;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod schema;
pub mod services;
