//! Builders for the HTTP state over the configured store.

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::{info, warn};

use crm_backend::app::{Credentials, Repositories, build_http_state};
use crm_backend::inbound::http::state::HttpState;
use crm_backend::outbound::memory::MemoryStore;
use crm_backend::outbound::persistence::{
    DbPool, DieselClientRepository, DieselOrderRepository, DieselProductRepository,
    DieselUserRepository,
};
use crm_backend::outbound::security::{Argon2PasswordHasher, JwtSessionTokens};

use super::ServerConfig;

fn credentials(config: &ServerConfig) -> Credentials {
    let clock = Arc::new(DefaultClock);
    Credentials {
        hasher: Arc::new(Argon2PasswordHasher::new()),
        tokens: Arc::new(JwtSessionTokens::new(
            &config.token_secret,
            config.token_ttl,
            clock.clone(),
        )),
        clock,
    }
}

fn postgres_repositories(
    pool: &DbPool,
) -> Repositories<DieselUserRepository, DieselClientRepository, DieselProductRepository, DieselOrderRepository>
{
    Repositories {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        clients: Arc::new(DieselClientRepository::new(pool.clone())),
        products: Arc::new(DieselProductRepository::new(pool.clone())),
        orders: Arc::new(DieselOrderRepository::new(pool.clone())),
    }
}

/// Wire services over PostgreSQL when a pool is configured, otherwise over a
/// fresh in-memory store.
pub(crate) fn build_state(config: &ServerConfig) -> HttpState {
    let credentials = credentials(config);
    match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL store");
            build_http_state(postgres_repositories(pool), credentials)
        }
        None => {
            warn!("no database configured; data is kept in memory and lost on exit");
            build_http_state(
                Repositories::shared(Arc::new(MemoryStore::new())),
                credentials,
            )
        }
    }
}
