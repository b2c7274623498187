//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Accounts provisioned by the seeding step.
    users (id) {
        id -> Int8,
        username -> Varchar,
        password_hash -> Text,
        /// `admin` or `tech`, enforced by a CHECK constraint.
        role -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Registered hardware and software assets.
    assets (id) {
        id -> Int8,
        name -> Varchar,
        asset_type -> Varchar,
        /// Unique when present.
        serial_number -> Nullable<Varchar>,
        location -> Nullable<Varchar>,
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Support tickets. `created_by` and `assigned_to` both reference
    /// `users`, so names are resolved with follow-up lookups rather than
    /// joins.
    tickets (id) {
        id -> Int8,
        title -> Varchar,
        description -> Text,
        priority -> Varchar,
        status -> Varchar,
        asset_id -> Nullable<Int8>,
        created_by -> Int8,
        assigned_to -> Nullable<Int8>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(tickets -> assets (asset_id));

diesel::allow_tables_to_appear_in_same_query!(assets, tickets, users);
