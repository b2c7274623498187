//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel row structs and
//! domain types. Rows (`models.rs`) and table definitions (`schema.rs`) stay
//! private to this module; every database failure is mapped onto the port's
//! `Connection`/`Query` error pair.
//!
//! # Example
//!
//! ```ignore
//! use service_desk::outbound::persistence::{DbPool, DieselTicketRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/desk")).await?;
//! let tickets = DieselTicketRepository::new(pool);
//! ```

mod diesel_asset_repository;
mod diesel_error_mapping;
mod diesel_ticket_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_asset_repository::DieselAssetRepository;
pub use diesel_ticket_repository::DieselTicketRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
