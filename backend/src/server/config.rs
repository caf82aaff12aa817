//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use accounts::config::AppSettings;
use accounts::domain::SessionPolicy;
use accounts::inbound::http::session_config::SessionSettings;
use accounts::outbound::persistence::DbPool;

/// Everything the server factory needs, resolved before binding.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) session_policy: SessionPolicy,
    pub(crate) bcrypt_cost: u32,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration from application settings and the
    /// validated session cookie settings.
    #[must_use]
    pub fn new(settings: &AppSettings, session: SessionSettings) -> Self {
        Self {
            session,
            session_policy: settings.session_policy(),
            bcrypt_cost: settings.bcrypt_cost(),
            bind_addr: settings.bind_addr(),
            db_pool: None,
        }
    }

    /// Attach a database connection pool; the Diesel adapters replace the
    /// in-memory stores.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
