//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use chrono::Duration;
use crm_backend::outbound::persistence::DbPool;
use zeroize::Zeroizing;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) token_secret: Zeroizing<Vec<u8>>,
    pub(crate) token_ttl: Duration,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a configuration that keeps data in memory until a pool is
    /// attached.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, token_secret: Vec<u8>, token_ttl: Duration) -> Self {
        Self {
            bind_addr,
            token_secret: Zeroizing::new(token_secret),
            token_ttl,
            db_pool: None,
        }
    }

    /// Attach a database connection pool; repositories become PostgreSQL
    /// backed.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
