//! Accounts server entry-point: loads configuration, prepares the stores and
//! serves the account endpoints.

mod server;

use std::io;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use accounts::config::AppSettings;
use accounts::inbound::http::health::HealthState;
use accounts::inbound::http::session_config::fingerprint::key_fingerprint;
use accounts::inbound::http::session_config::{BuildMode, session_settings_from_env};
use accounts::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

use server::{ServerConfig, create_server};

/// Apply migrations and open the async pool.
async fn connect_database(pool_config: PoolConfig) -> io::Result<DbPool> {
    let url = pool_config.database_url().to_owned();
    tokio::task::spawn_blocking(move || run_pending_migrations(&url))
        .await
        .map_err(|err| io::Error::other(format!("migration task failed: {err}")))?
        .map_err(io::Error::other)?;
    DbPool::new(pool_config)
        .await
        .map_err(|err| io::Error::other(format!("database pool: {}", err.message())))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|err| io::Error::other(format!("invalid configuration: {err}")))?;
    let env = DefaultEnv::new();
    let session = session_settings_from_env(&env, BuildMode::from_debug_assertions())
        .map_err(io::Error::other)?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        cookie_secure = session.cookie_secure,
        "session key loaded"
    );

    let mut config = ServerConfig::new(&settings, session);
    if let Some(pool_config) = settings.pool_config() {
        config = config.with_db_pool(connect_database(pool_config).await?);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(addr = %config.bind_addr(), "starting accounts server");
    let server = create_server(health_state.clone(), config)?;
    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome
}
