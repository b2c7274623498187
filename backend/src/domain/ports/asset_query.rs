//! Driving port for asset reads.

use async_trait::async_trait;

use crate::domain::{Asset, Error, User};

/// Raw list filter; an invalid status is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListAssetsRequest {
    /// Asset status wire name.
    pub status: Option<String>,
}

/// Asset use-cases that only read.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetQuery: Send + Sync {
    /// List assets ordered by name.
    async fn list(&self, actor: &User, request: ListAssetsRequest) -> Result<Vec<Asset>, Error>;
}
