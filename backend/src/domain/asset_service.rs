//! Asset domain service.
//!
//! Only admins register assets. The role check runs before any field is
//! inspected, so non-admins learn nothing about which inputs were valid.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use super::ports::{
    AssetCommand, AssetQuery, AssetRepository, AssetRepositoryError, CreateAssetRequest,
    ListAssetsRequest,
};
use super::service_support::{invalid_field, persistence_failure, present};
use super::validation::validate_string;
use super::{
    ASSET_NAME_MAX, ASSET_NAME_MIN, ASSET_OPTIONAL_FIELD_MAX, ASSET_OPTIONAL_FIELD_MIN,
    ASSET_TYPE_MAX, ASSET_TYPE_MIN, Asset, AssetId, AssetListFilter, AssetStatus, Error, NewAsset,
    User,
};

const CREATE_FORBIDDEN: &str = "Only admins can create assets.";
const CREATE_INVALID: &str = "Invalid input data.";

/// Asset service implementing the asset driving ports.
#[derive(Clone)]
pub struct AssetService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> AssetService<R> {
    /// Create a new service over `repo`, stamping inserts with `clock`.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

fn optional_field(raw: Option<&str>, field: &'static str) -> Result<Option<String>, Error> {
    present(raw)
        .map(|value| validate_string(value, ASSET_OPTIONAL_FIELD_MIN, ASSET_OPTIONAL_FIELD_MAX))
        .transpose()
        .map_err(|failure| invalid_field(CREATE_INVALID, field, failure.code()))
}

impl<R> AssetService<R>
where
    R: AssetRepository,
{
    fn map_repository_error(operation: &'static str, error: &AssetRepositoryError) -> Error {
        match error {
            AssetRepositoryError::Connection { .. } => {
                persistence_failure(operation, &format!("asset store unavailable: {error}"))
            }
            AssetRepositoryError::Query { .. } => persistence_failure(operation, error),
        }
    }

    fn new_asset(&self, request: &CreateAssetRequest) -> Result<NewAsset, Error> {
        let name = validate_string(&request.name, ASSET_NAME_MIN, ASSET_NAME_MAX)
            .map_err(|failure| invalid_field(CREATE_INVALID, "name", failure.code()))?;
        let asset_type = validate_string(&request.asset_type, ASSET_TYPE_MIN, ASSET_TYPE_MAX)
            .map_err(|failure| invalid_field(CREATE_INVALID, "asset_type", failure.code()))?;
        let serial_number = optional_field(request.serial_number.as_deref(), "serial_number")?;
        let location = optional_field(request.location.as_deref(), "location")?;

        Ok(NewAsset {
            name,
            asset_type,
            serial_number,
            location,
            status: AssetStatus::Active,
            created_at: self.clock.utc(),
        })
    }
}

#[async_trait]
impl<R> AssetCommand for AssetService<R>
where
    R: AssetRepository,
{
    async fn create(&self, request: CreateAssetRequest) -> Result<AssetId, Error> {
        let actor = match &request.actor {
            Some(actor) if actor.is_admin() => actor.id(),
            _ => return Err(Error::forbidden(CREATE_FORBIDDEN)),
        };
        let asset = self.new_asset(&request)?;
        let id = self
            .repo
            .insert(&asset)
            .await
            .map_err(|err| Self::map_repository_error("insert asset", &err))?;
        info!(asset_id = %id, %actor, "asset created");
        Ok(id)
    }
}

#[async_trait]
impl<R> AssetQuery for AssetService<R>
where
    R: AssetRepository,
{
    async fn list(&self, actor: &User, request: ListAssetsRequest) -> Result<Vec<Asset>, Error> {
        let status = request
            .status
            .as_deref()
            .and_then(|raw| match AssetStatus::from_str(raw) {
                Ok(status) => Some(status),
                Err(failure) => {
                    debug!(value = raw, reason = %failure, "ignoring asset status filter");
                    None
                }
            });
        debug!(actor = %actor.id(), ?status, "listing assets");
        self.repo
            .list(&AssetListFilter { status })
            .await
            .map_err(|err| Self::map_repository_error("list assets", &err))
    }
}

#[cfg(test)]
#[path = "asset_service_tests.rs"]
mod tests;
