//! Prepares the catalog database: applies migrations and optionally loads the
//! reference client fixture.

use std::env;

use config::Config;
use dotenvy::dotenv;

use client_catalog::db::{establish_connection_pool, run_migrations};
use client_catalog::fixtures::sample_clients;
use client_catalog::models::config::AppConfig;
use client_catalog::repository::{ClientReader, ClientWriter, DieselRepository, Transactional};
use client_catalog::services::ServiceResult;
use client_catalog::services::client::{count_clients, insert_client};

fn seed<R>(repo: &R) -> ServiceResult<usize>
where
    R: ClientReader + ClientWriter + Transactional,
{
    if count_clients(repo)? > 0 {
        log::info!("Clients table is not empty, skipping fixture");
        return Ok(0);
    }

    repo.transaction(|| -> ServiceResult<usize> {
        let fixture = sample_clients();
        for dto in &fixture {
            let inserted = insert_client(repo, dto)?;
            log::debug!("Inserted client {:?} ({})", inserted.id, inserted.name);
        }
        Ok(fixture.len())
    })
}

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        // Add `./config/default.yaml`
        .add_source(config::File::with_name("config/default"))
        // Add environment-specific overrides
        .add_source(config::File::with_name(&format!("config/{}", app_env)).required(false))
        // Add settings from the environment (with a prefix of APP)
        .add_source(config::Environment::with_prefix("APP"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {}", err);
            std::process::exit(1);
        }
    };

    let app_config = match settings.try_deserialize::<AppConfig>() {
        Ok(app_config) => app_config,
        Err(err) => {
            log::error!("Error loading app config: {}", err);
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&app_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    match run_migrations(&pool) {
        Ok(applied) => log::info!("Applied {applied} pending migrations"),
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    }

    if !app_config.seed_fixture {
        log::info!("Fixture seeding disabled");
        return;
    }

    let repo = DieselRepository::new(pool);
    match seed(&repo) {
        Ok(inserted) => log::info!("Seeded {inserted} clients"),
        Err(e) => {
            log::error!("Failed to seed clients: {e}");
            std::process::exit(1);
        }
    }
}
