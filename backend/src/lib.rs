//! Service desk backend: ticket and asset management for an IT help desk.
//!
//! Layout follows ports and adapters:
//! - [`domain`]: entities, validation, services, and port traits;
//! - [`inbound`]: the actix-web REST and JSON-RPC adapters;
//! - [`outbound`]: Diesel persistence and argon2 credential adapters;
//! - [`server`]: application assembly.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;
#[cfg(feature = "test-support")]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
