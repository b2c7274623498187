//! Database lifecycle helpers for embedded PostgreSQL suites.
//!
//! Databases are dropped and recreated through a plain `postgres` client so
//! `DROP DATABASE` never runs inside a Diesel transaction. Schemas come from
//! the embedded migrations the server applies at startup.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::MigrationHarness;
use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use service_desk::outbound::persistence::MIGRATIONS;

use super::format_postgres_error;

const MAINTENANCE_DB: &str = "postgres";

/// Drop `name` if present and create it empty.
pub fn reset_database(cluster: &TestCluster, name: &str) -> Result<(), String> {
    let url = cluster.connection().database_url(MAINTENANCE_DB);
    let mut client = Client::connect(&url, NoTls).map_err(|err| format_postgres_error(&err))?;
    // Separate statements: a multi-statement batch runs as one transaction.
    client
        .batch_execute(&format!("DROP DATABASE IF EXISTS \"{name}\" WITH (FORCE)"))
        .map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!("CREATE DATABASE \"{name}\""))
        .map_err(|err| format_postgres_error(&err))
}

/// Apply every embedded migration to the database at `url`.
pub fn migrate_schema(url: &str) -> Result<(), String> {
    let mut conn = PgConnection::establish(url).map_err(|err| format!("{err:?}"))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| format!("migration: {err:?}"))?;
    Ok(())
}

/// Insert a user row directly and return its id.
pub fn seed_user(url: &str, username: &str, role: &str) -> Result<i64, String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    let row = client
        .query_one(
            "INSERT INTO users (username, password_hash, role) VALUES ($1, $2, $3) RETURNING id",
            &[&username, &"unused-hash", &role],
        )
        .map_err(|err| format_postgres_error(&err))?;
    Ok(row.get(0))
}

/// Delete a user row directly, bypassing the repositories.
pub fn delete_user(url: &str, id: i64) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .execute("DELETE FROM users WHERE id = $1", &[&id])
        .map_err(|err| format_postgres_error(&err))?;
    Ok(())
}
