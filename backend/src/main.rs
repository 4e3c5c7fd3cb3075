//! Backend entry-point: loads settings, prepares the store and serves the API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use rand::RngCore;
use rand::rngs::OsRng;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use crm_backend::inbound::http::health::HealthState;
use crm_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use crm_backend::settings::AppSettings;
use ortho_config::OrthoConfig;
use server::{ServerConfig, create_server};

const EPHEMERAL_SECRET_LEN: usize = 32;

/// Signing secret from settings; debug builds fall back to a random one.
fn token_secret(settings: &AppSettings) -> Result<Vec<u8>> {
    if let Some(secret) = settings.token_secret() {
        return Ok(secret.as_bytes().to_vec());
    }
    if cfg!(debug_assertions) {
        warn!("CRM_TOKEN_SECRET not set; using an ephemeral secret (dev only)");
        let mut secret = vec![0_u8; EPHEMERAL_SECRET_LEN];
        OsRng.fill_bytes(&mut secret);
        return Ok(secret);
    }
    Err(eyre!("CRM_TOKEN_SECRET must be set"))
}

async fn server_config(settings: &AppSettings) -> Result<ServerConfig> {
    let config = ServerConfig::new(
        settings.bind_addr()?,
        token_secret(settings)?,
        settings.token_ttl()?,
    );
    let Some(database_url) = settings.database_url.as_deref() else {
        return Ok(config);
    };

    if settings.skip_migrations {
        info!("skipping database migrations");
    } else {
        run_pending_migrations(database_url)
            .await
            .wrap_err("failed to apply database migrations")?;
    }
    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
    )
    .await
    .wrap_err("failed to build database pool")?;
    Ok(config.with_db_pool(pool))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("failed to load settings")?;
    let config = server_config(&settings).await?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), &config)?;
    info!(addr = %config.bind_addr, "server listening");
    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome.wrap_err("server terminated with an error")
}
