//! Create or refresh the default `admin` and `tech1` accounts.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::ffi::OsString;
use std::io;
use std::sync::Arc;

use clap::Parser;
use ortho_config::OrthoConfig;
use service_desk::domain::ports::ProvisionOutcome;
use service_desk::domain::UserProvisioner;
use service_desk::outbound::credentials::Argon2PasswordHasher;
use service_desk::outbound::persistence::{
    DbPool, DieselUserRepository, PoolConfig, run_pending_migrations,
};
use service_desk::settings::SeedSettings;
use tokio::runtime::Builder;
use tracing_subscriber::{EnvFilter, fmt};

const DATABASE_URL_VAR: &str = "SERVICE_DESK_DATABASE_URL";

/// `provision-users` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "provision-users",
    about = "Create or refresh the default admin and technician accounts",
    version
)]
struct CliArgs {
    /// Database connection URL. Falls back to `SERVICE_DESK_DATABASE_URL`.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
    /// Overwrite passwords of accounts that already exist.
    #[arg(long = "reset-passwords")]
    reset_passwords: bool,
    /// Apply pending migrations before provisioning.
    #[arg(long = "migrate")]
    migrate: bool,
}

fn main() -> io::Result<()> {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .try_init()
    {
        eprintln!("tracing init failed: {error}");
    }
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let database_url = resolve_database_url(args.database_url)?;
    let seed = SeedSettings::load_from_iter([OsString::from("provision-users")])
        .map_err(|error| io::Error::other(format!("load seed settings: {error}")))?;
    let mut accounts = seed.accounts();
    accounts.reset_passwords |= args.reset_passwords;

    if args.migrate {
        let applied = run_pending_migrations(&database_url)
            .await
            .map_err(|error| io::Error::other(format!("apply migrations: {error}")))?;
        println!("migrations_applied={applied}");
    }

    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;
    let provisioner = UserProvisioner::new(
        Arc::new(DieselUserRepository::new(pool)),
        Arc::new(Argon2PasswordHasher::new()),
    );
    let reports = provisioner
        .provision_defaults(&accounts)
        .await
        .map_err(|error| io::Error::other(format!("provision users: {error}")))?;

    for report in reports {
        let (outcome, id) = match report.outcome {
            ProvisionOutcome::Created(id) => ("created", id),
            ProvisionOutcome::Updated(id) => ("updated", id),
        };
        println!("{}={outcome} id={id}", report.username);
    }
    Ok(())
}

fn resolve_database_url(explicit: Option<String>) -> io::Result<String> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "--database-url must not be empty when provided",
            ));
        }
        return Ok(value);
    }

    let from_env = env::var(DATABASE_URL_VAR).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("database URL missing: set --database-url or {DATABASE_URL_VAR}"),
        )
    })?;
    if from_env.trim().is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{DATABASE_URL_VAR} must not be empty"),
        ));
    }
    Ok(from_env)
}
