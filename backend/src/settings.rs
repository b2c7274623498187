//! Process configuration loaded via OrthoConfig.
//!
//! [`ServerSettings`] reads `SERVICE_DESK_*` and [`SeedSettings`] reads
//! `SEED_*`; both also accept CLI flags and configuration files.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::domain::SeedAccounts;
use crate::server::DEFAULT_SESSION_COOKIE;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_TIMEOUT_SECS: u64 = 3600;
const DEFAULT_ADMIN_PASSWORD: &str = "Admin123!";
const DEFAULT_TECH_PASSWORD: &str = "Tech123!";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("session timeout must be positive")]
    ZeroSessionTimeout,
}

/// HTTP server and database settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SERVICE_DESK")]
pub struct ServerSettings {
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
    /// Session cookie name.
    pub session_name: Option<String>,
    /// Session lifetime in seconds.
    pub session_timeout_secs: Option<u64>,
}

impl ServerSettings {
    /// Parse the configured bind address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
                source,
            })
    }

    pub fn session_name(&self) -> &str {
        self.session_name.as_deref().unwrap_or(DEFAULT_SESSION_COOKIE)
    }

    /// Session time-to-live; zero is rejected.
    pub fn session_timeout(&self) -> Result<Duration, SettingsError> {
        match self.session_timeout_secs.unwrap_or(DEFAULT_SESSION_TIMEOUT_SECS) {
            0 => Err(SettingsError::ZeroSessionTimeout),
            secs => Ok(Duration::from_secs(secs)),
        }
    }
}

/// Default-account seeding settings.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SEED")]
pub struct SeedSettings {
    /// Provision the default accounts at server startup.
    #[ortho_config(default = false)]
    pub enabled: bool,
    pub admin_password: Option<String>,
    pub tech_password: Option<String>,
    /// Overwrite passwords of accounts that already exist.
    #[ortho_config(default = false)]
    pub reset_passwords: bool,
}

impl SeedSettings {
    /// Passwords and policy handed to the provisioner.
    pub fn accounts(&self) -> SeedAccounts {
        SeedAccounts {
            admin_password: Zeroizing::new(
                self.admin_password
                    .clone()
                    .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_owned()),
            ),
            tech_password: Zeroizing::new(
                self.tech_password
                    .clone()
                    .unwrap_or_else(|| DEFAULT_TECH_PASSWORD.to_owned()),
            ),
            reset_passwords: self.reset_passwords,
        }
    }
}

impl std::fmt::Debug for SeedSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedSettings")
            .field("enabled", &self.enabled)
            .field("reset_passwords", &self.reset_passwords)
            .finish_non_exhaustive()
    }
}
