//! Driving port for asset mutations.

use async_trait::async_trait;

use crate::domain::{AssetId, Error, User};

/// Raw input for registering an asset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateAssetRequest {
    /// Acting user; must hold the admin role.
    pub actor: Option<User>,
    /// Name, 3–100 characters.
    pub name: String,
    /// Category, 3–50 characters.
    pub asset_type: String,
    /// Optional serial number, 1–100 characters when present.
    pub serial_number: Option<String>,
    /// Optional location, 1–100 characters when present.
    pub location: Option<String>,
}

/// Asset use-cases that change state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetCommand: Send + Sync {
    /// Register an `active` asset and return its identifier.
    async fn create(&self, request: CreateAssetRequest) -> Result<AssetId, Error>;
}
