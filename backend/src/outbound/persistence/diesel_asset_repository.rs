//! PostgreSQL-backed `AssetRepository` implementation using Diesel ORM.

use std::str::FromStr;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AssetRepository, AssetRepositoryError};
use crate::domain::{Asset, AssetId, AssetListFilter, AssetStatus, NewAsset};

use super::diesel_error_mapping::{corrupt_row, map_diesel_error, map_pool_error};
use super::models::{AssetRow, NewAssetRow};
use super::pool::{DbPool, PoolError};
use super::schema::assets;

/// Diesel-backed implementation of the `AssetRepository` port.
#[derive(Clone)]
pub struct DieselAssetRepository {
    pool: DbPool,
}

impl DieselAssetRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> AssetRepositoryError {
    map_pool_error(error, |message| AssetRepositoryError::connection(message))
}

fn diesel_error(error: diesel::result::Error) -> AssetRepositoryError {
    map_diesel_error(
        error,
        |message| AssetRepositoryError::query(message),
        |message| AssetRepositoryError::connection(message),
    )
}

fn row_to_asset(row: AssetRow) -> Result<Asset, AssetRepositoryError> {
    let id = AssetId::try_from(row.id)
        .map_err(|err| AssetRepositoryError::query(corrupt_row("assets", "id", err)))?;
    let status = AssetStatus::from_str(&row.status)
        .map_err(|err| AssetRepositoryError::query(corrupt_row("assets", "status", err)))?;
    Ok(Asset {
        id,
        name: row.name,
        asset_type: row.asset_type,
        serial_number: row.serial_number,
        location: row.location,
        status,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl AssetRepository for DieselAssetRepository {
    async fn insert(&self, asset: &NewAsset) -> Result<AssetId, AssetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = NewAssetRow {
            name: &asset.name,
            asset_type: &asset.asset_type,
            serial_number: asset.serial_number.as_deref(),
            location: asset.location.as_deref(),
            status: asset.status.as_str(),
            created_at: asset.created_at,
            updated_at: asset.created_at,
        };
        let id: i64 = diesel::insert_into(assets::table)
            .values(&row)
            .returning(assets::id)
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;

        AssetId::try_from(id)
            .map_err(|err| AssetRepositoryError::query(corrupt_row("assets", "id", err)))
    }

    async fn list(&self, filter: &AssetListFilter) -> Result<Vec<Asset>, AssetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let mut query = assets::table.select(AssetRow::as_select()).into_boxed();
        if let Some(status) = filter.status {
            query = query.filter(assets::status.eq(status.as_str()));
        }
        let rows: Vec<AssetRow> = query
            .order((assets::name.asc(), assets::id.asc()))
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter().map(row_to_asset).collect()
    }
}
