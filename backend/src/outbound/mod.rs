//! Driven adapters: PostgreSQL repositories and password hashing.

pub mod credentials;
pub mod persistence;
