//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Settings consumed by the catalog binaries.
pub struct AppConfig {
    pub database_url: String,
    /// Insert the reference client fixture when the table is empty.
    #[serde(default)]
    pub seed_fixture: bool,
}
