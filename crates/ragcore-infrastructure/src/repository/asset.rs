//! Postgres-backed [`AssetRepository`] (§4.2).

use crate::database::DatabasePool;
use async_trait::async_trait;
use ragcore_domain::error::{Error, Result};
use ragcore_domain::ports::AssetRepository;
use ragcore_domain::value_objects::{Asset, AssetType};

/// Asset rows persisted in a `(project_id, asset_name)`-unique table.
pub struct PostgresAssetRepository {
    pool: DatabasePool,
}

impl PostgresAssetRepository {
    #[must_use]
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn asset_type_str(asset_type: AssetType) -> &'static str {
    match asset_type {
        AssetType::File => "file",
    }
}

#[async_trait]
impl AssetRepository for PostgresAssetRepository {
    async fn create_asset(&self, asset: &Asset) -> Result<Asset> {
        let pool = self.pool.clone();
        let asset = asset.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get_connection()?;
            let row = conn
                .query_one(
                    "INSERT INTO assets (project_id, asset_type, asset_name, asset_size)
                     VALUES ($1, $2, $3, $4)
                     RETURNING id",
                    &[
                        &asset.project_id,
                        &asset_type_str(asset.asset_type),
                        &asset.asset_name,
                        &asset.asset_size,
                    ],
                )
                .map_err(|e| Error::storage_with_source("failed to insert asset", e))?;
            Ok(Asset {
                id: Some(row.get::<_, i64>(0)),
                ..asset
            })
        })
        .await
        .map_err(|e| Error::internal(format!("asset task panicked: {e}")))?
    }

    async fn get_asset_by_name(&self, project_id: i64, asset_name: &str) -> Result<Option<Asset>> {
        let pool = self.pool.clone();
        let asset_name = asset_name.to_string();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get_connection()?;
            let row = conn
                .query_opt(
                    "SELECT id, project_id, asset_name, asset_size
                     FROM assets WHERE project_id = $1 AND asset_name = $2",
                    &[&project_id, &asset_name],
                )
                .map_err(|e| Error::storage_with_source("failed to fetch asset by name", e))?;
            Ok(row.map(row_to_asset))
        })
        .await
        .map_err(|e| Error::internal(format!("asset task panicked: {e}")))?
    }

    async fn get_asset_by_id(&self, project_id: i64, asset_id: i64) -> Result<Option<Asset>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get_connection()?;
            let row = conn
                .query_opt(
                    "SELECT id, project_id, asset_name, asset_size
                     FROM assets WHERE project_id = $1 AND id = $2",
                    &[&project_id, &asset_id],
                )
                .map_err(|e| Error::storage_with_source("failed to fetch asset by id", e))?;
            Ok(row.map(row_to_asset))
        })
        .await
        .map_err(|e| Error::internal(format!("asset task panicked: {e}")))?
    }

    async fn list_assets(&self, project_id: i64, asset_type: AssetType) -> Result<Vec<Asset>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get_connection()?;
            let rows = conn
                .query(
                    "SELECT id, project_id, asset_name, asset_size
                     FROM assets WHERE project_id = $1 AND asset_type = $2
                     ORDER BY id ASC",
                    &[&project_id, &asset_type_str(asset_type)],
                )
                .map_err(|e| Error::storage_with_source("failed to list assets", e))?;
            Ok(rows.into_iter().map(row_to_asset).collect())
        })
        .await
        .map_err(|e| Error::internal(format!("asset task panicked: {e}")))?
    }
}

fn row_to_asset(row: r2d2_postgres::postgres::Row) -> Asset {
    Asset {
        id: Some(row.get::<_, i64>(0)),
        project_id: row.get::<_, i64>(1),
        asset_type: AssetType::File,
        asset_name: row.get::<_, String>(2),
        asset_size: row.get::<_, i64>(3),
    }
}
