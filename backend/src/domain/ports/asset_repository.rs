//! Driven port for asset persistence.

use async_trait::async_trait;

use crate::domain::{Asset, AssetId, AssetListFilter, NewAsset};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by asset repository adapters.
    pub enum AssetRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "asset repository connection failed: {message}",
        /// Query or mutation failed during execution, including constraint
        /// violations such as a duplicate serial number.
        Query { message: String } => "asset repository query failed: {message}",
    }
}

/// Storage operations over assets.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetRepository: Send + Sync {
    /// Insert an asset and return its assigned identifier.
    async fn insert(&self, asset: &NewAsset) -> Result<AssetId, AssetRepositoryError>;

    /// List assets ordered by name, applying the equality filter.
    async fn list(&self, filter: &AssetListFilter) -> Result<Vec<Asset>, AssetRepositoryError>;
}
