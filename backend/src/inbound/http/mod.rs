//! HTTP inbound adapter: REST handlers, the JSON-RPC endpoint, sessions,
//! and the error envelope.

pub mod assets;
pub mod error;
pub mod health;
pub mod rpc;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod tickets;
pub mod users;
pub mod validation;

pub use error::ApiResult;
