//! Application settings loaded via OrthoConfig.
//!
//! Values come from `ACCOUNTS_*` environment variables, configuration files
//! and command-line flags, layered by `ortho_config`. Session cookie toggles
//! are read separately by [`crate::inbound::http::session_config`].

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::SessionPolicy;
use crate::outbound::persistence::{DEFAULT_POOL_SIZE, PoolConfig};

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Server, storage and credential settings.
///
/// Unset values fall back to their defaults. Without a database URL the
/// in-memory stores are used.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ACCOUNTS")]
pub struct AppSettings {
    /// Address to bind the HTTP listener to.
    pub host: Option<IpAddr>,
    /// Port to bind the HTTP listener to.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// PostgreSQL connection string. Without it accounts live in memory.
    pub database_url: Option<String>,
    /// Absolute session lifetime in minutes.
    #[ortho_config(default = 120)]
    pub session_ttl_minutes: u32,
    /// bcrypt work factor for new password hashes.
    #[ortho_config(default = 12)]
    pub bcrypt_cost: u32,
    /// Maximum number of pooled database connections.
    pub pool_size: Option<u32>,
}

impl AppSettings {
    /// Socket address for the HTTP listener.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host.unwrap_or(DEFAULT_HOST), self.port)
    }

    pub fn session_policy(&self) -> SessionPolicy {
        SessionPolicy::from_minutes(self.session_ttl_minutes)
    }

    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost
    }

    /// Pool settings, or `None` when the in-memory stores should be used.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref().map(str::trim)?;
        if url.is_empty() {
            return None;
        }
        Some(PoolConfig::new(url).with_max_size(self.pool_size.unwrap_or(DEFAULT_POOL_SIZE)))
    }
}
