//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their serialized shape and register under the domain
//! type's name via `#[schema(as = ...)]`.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// Caller-supplied data is malformed or out of range.
    #[schema(rename = "invalid_input")]
    InvalidInput,
    /// No authenticated session.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The session user lacks the required role.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The backing store failed; details are only logged.
    #[schema(rename = "persistence_error")]
    PersistenceError,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_input")]
    code: ErrorCodeSchema,
    /// Client-safe message.
    #[schema(example = "Invalid input data.")]
    message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field-level context such as `{"field": "title", "code": "too_short"}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Role`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Role)]
pub enum RoleSchema {
    #[schema(rename = "admin")]
    Admin,
    #[schema(rename = "tech")]
    Tech,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Stable user identifier.
    #[schema(example = 2)]
    id: i64,
    /// Unique login name.
    #[schema(example = "tech1")]
    username: String,
    /// Role gating assignment and asset registration.
    role: RoleSchema,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[rstest]
    fn error_code_schema_lists_every_domain_code() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        for code in [
            crate::domain::ErrorCode::InvalidInput,
            crate::domain::ErrorCode::Unauthorized,
            crate::domain::ErrorCode::Forbidden,
            crate::domain::ErrorCode::NotFound,
            crate::domain::ErrorCode::PersistenceError,
            crate::domain::ErrorCode::InternalError,
        ] {
            let wire = serde_json::to_value(code).expect("code serialises");
            let wire = wire.as_str().expect("code is a string");
            assert!(schema_json.contains(wire), "missing {wire}");
        }
    }

    #[rstest]
    fn error_schema_uses_wire_field_names() {
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        let schema_json = schema_to_json::<ErrorSchema>();
        assert!(schema_json.contains("traceId"));
        assert!(!schema_json.contains("trace_id"));
    }

    #[rstest]
    fn user_schema_matches_serialized_user() {
        assert_eq!(UserSchema::name(), "crate.domain.User");
        let schema_json = schema_to_json::<UserSchema>();
        for field in ["id", "username", "role"] {
            assert!(schema_json.contains(field), "missing {field}");
        }
        let role_json = schema_to_json::<RoleSchema>();
        assert!(role_json.contains("admin") && role_json.contains("tech"));
    }
}
