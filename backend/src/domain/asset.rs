//! Tracked hardware and software assets.

use chrono::{DateTime, Utc};

use super::record_id::define_record_id;
use super::wire_enum::define_wire_enum;

/// Minimum asset name length.
pub const ASSET_NAME_MIN: usize = 3;
/// Maximum asset name length.
pub const ASSET_NAME_MAX: usize = 100;
/// Minimum asset type length.
pub const ASSET_TYPE_MIN: usize = 3;
/// Maximum asset type length.
pub const ASSET_TYPE_MAX: usize = 50;
/// Minimum length of serial number and location when present.
pub const ASSET_OPTIONAL_FIELD_MIN: usize = 1;
/// Maximum length of serial number and location when present.
pub const ASSET_OPTIONAL_FIELD_MAX: usize = 100;

define_record_id! {
    /// Stable identifier of an asset.
    AssetId
}

define_wire_enum! {
    /// Lifecycle state of an asset.
    pub enum AssetStatus {
        /// In service.
        Active => "active",
        /// Temporarily out of service.
        Inactive => "inactive",
        /// Permanently decommissioned.
        Retired => "retired",
    }
}

/// Values required to insert an asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAsset {
    /// Display name.
    pub name: String,
    /// Free-form category such as "Laptop".
    pub asset_type: String,
    /// Manufacturer serial, unique when present.
    pub serial_number: Option<String>,
    /// Physical location.
    pub location: Option<String>,
    /// Always [`AssetStatus::Active`] for new assets.
    pub status: AssetStatus,
    /// Creation time; also the initial `updated_at`.
    pub created_at: DateTime<Utc>,
}

/// Persisted asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// Identifier.
    pub id: AssetId,
    /// Display name.
    pub name: String,
    /// Free-form category.
    pub asset_type: String,
    /// Manufacturer serial.
    pub serial_number: Option<String>,
    /// Physical location.
    pub location: Option<String>,
    /// Lifecycle state.
    pub status: AssetStatus,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last mutation time.
    pub updated_at: DateTime<Utc>,
}

/// Equality filters applied to the asset list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssetListFilter {
    /// Only assets in this state.
    pub status: Option<AssetStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_values_match_storage_constraint() {
        assert_eq!(AssetStatus::VALUES, &["active", "inactive", "retired"]);
        assert_eq!(AssetStatus::from_str("retired"), Ok(AssetStatus::Retired));
        assert!(AssetStatus::from_str("Active").is_err());
    }
}
