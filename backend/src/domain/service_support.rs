//! Helpers shared by the ticket, asset, and login services.

use serde_json::json;
use tracing::warn;

use super::Error;

/// Client-facing message for every store failure.
pub const DATABASE_ERROR_MESSAGE: &str = "Database error.";

/// Build an `invalid_input` error whose details name the failing field.
pub(crate) fn invalid_field(message: &'static str, field: &'static str, code: &str) -> Error {
    Error::invalid_input(message).with_details(json!({ "field": field, "code": code }))
}

/// Treat absent and whitespace-only optional input the same way.
pub(crate) fn present(raw: Option<&str>) -> Option<&str> {
    raw.filter(|value| !value.trim().is_empty())
}

/// Log the internal cause and return the generic persistence error.
pub(crate) fn persistence_failure(operation: &'static str, cause: &dyn std::fmt::Display) -> Error {
    warn!(operation, error = %cause, "persistence operation failed");
    Error::persistence(DATABASE_ERROR_MESSAGE)
}
