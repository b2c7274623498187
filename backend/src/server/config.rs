//! HTTP server configuration object.

use std::net::SocketAddr;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};

use crate::outbound::persistence::DbPool;

/// Builder-style configuration for [`super::create_server`].
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) session_name: String,
    pub(crate) session_ttl: Duration,
}

impl ServerConfig {
    /// Construct a configuration with the default cookie name and a
    /// one-hour session lifetime.
    #[must_use]
    pub fn new(
        key: Key,
        cookie_secure: bool,
        same_site: SameSite,
        bind_addr: SocketAddr,
        db_pool: DbPool,
    ) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool,
            session_name: super::DEFAULT_SESSION_COOKIE.to_owned(),
            session_ttl: super::DEFAULT_SESSION_TTL,
        }
    }

    /// Override the session cookie name and lifetime.
    #[must_use]
    pub fn with_session(mut self, name: impl Into<String>, ttl: Duration) -> Self {
        self.session_name = name.into();
        self.session_ttl = ttl;
        self
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
