use std::net::SocketAddr;

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::{AppConfig, ServerConfig};
use dotenvy::dotenv;
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};
use service::db::seed::{seed_sample_data, SeedOutcome};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn is_missing_file(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .map_or(false, |io| io.kind() == std::io::ErrorKind::NotFound)
}

/// Config file first (`CONFIG_PATH` or `config.toml`); without one, environment variables
fn load_config() -> Result<AppConfig, StartupError> {
    match AppConfig::load_and_validate() {
        Ok(cfg) => Ok(cfg),
        Err(e) if is_missing_file(&e) => {
            info!("no config file found, using environment variables");
            Ok(AppConfig::from_env())
        }
        Err(e) => Err(StartupError::InvalidConfig(e.to_string())),
    }
}

fn database_config(cfg: &AppConfig) -> Result<DatabaseConfig, StartupError> {
    if cfg.database.url.trim().is_empty() {
        return Ok(DatabaseConfig::from_env());
    }
    cfg.database
        .validate()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    Ok(DatabaseConfig::from(&cfg.database))
}

fn bind_addr(server: &ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", server.host, server.port).parse()?)
}

/// Connect, migrate and optionally seed, then return the router.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let db = connect_with_config(&database_config(cfg)?).await?;
    migration::Migrator::up(&db, None).await?;
    info!("database migrations applied");

    if cfg.seed.sample_data {
        match seed_sample_data(&db).await? {
            SeedOutcome::Inserted { departments, employees } => {
                info!(departments, employees, "seeded sample data")
            }
            SeedOutcome::Skipped { .. } => {}
        }
    } else {
        warn!("sample data seeding disabled");
    }

    Ok(routes::build_router(AppState::new(db), build_cors()))
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = load_config()?;
    let app = build_app(&cfg).await?;

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting staff directory server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
