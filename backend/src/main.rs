//! Service desk entry-point: loads settings, prepares the database, and
//! serves the REST, JSON-RPC, and health endpoints.

use std::ffi::OsString;
use std::io;
use std::sync::Arc;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use service_desk::domain::UserProvisioner;
use service_desk::inbound::http::health::HealthState;
use service_desk::inbound::http::session_config::{BuildMode, session_settings_from_env};
use service_desk::outbound::credentials::Argon2PasswordHasher;
use service_desk::outbound::persistence::{
    DbPool, DieselUserRepository, PoolConfig, run_pending_migrations,
};
use service_desk::server::{ServerConfig, create_server};
use service_desk::settings::{SeedSettings, ServerSettings};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }
}

async fn seed_default_accounts(pool: &DbPool, seed: &SeedSettings) -> io::Result<()> {
    let provisioner = UserProvisioner::new(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(Argon2PasswordHasher::new()),
    );
    let reports = provisioner
        .provision_defaults(&seed.accounts())
        .await
        .map_err(|e| io::Error::other(format!("seed default accounts: {e}")))?;
    info!(accounts = reports.len(), "default accounts provisioned");
    Ok(())
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    init_tracing();

    let settings = ServerSettings::load().map_err(|e| io::Error::other(e.to_string()))?;
    let seed = SeedSettings::load_from_iter([OsString::from("service-desk")])
        .map_err(|e| io::Error::other(e.to_string()))?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let session_ttl = settings.session_timeout().map_err(io::Error::other)?;
    let database_url = settings.database_url.clone().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SERVICE_DESK_DATABASE_URL (or --database-url) is required",
        )
    })?;

    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(io::Error::other)?;

    if settings.run_migrations {
        run_pending_migrations(&database_url)
            .await
            .map_err(io::Error::other)?;
    }

    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .map_err(io::Error::other)?;

    if seed.enabled {
        seed_default_accounts(&pool, &seed).await?;
    }

    let config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
        pool,
    )
    .with_session(settings.session_name(), session_ttl);

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome
}
