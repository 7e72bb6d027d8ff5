//! Relational storage ports (§4.2).
//!
//! All mutating calls are transactional; each public call commits at most
//! once. Implementations live in `ragcore-infrastructure`.

use crate::error::Result;
use crate::value_objects::{Asset, AssetType, DataChunk, Project};
use async_trait::async_trait;

/// Project persistence.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Atomically fetch the project with `id`, creating it if absent.
    async fn get_or_create_project(&self, id: i64) -> Result<Project>;

    /// Fetch a project by id without creating it.
    async fn get_project_by_id(&self, id: i64) -> Result<Option<Project>>;
}

/// Asset persistence.
#[async_trait]
pub trait AssetRepository: Send + Sync {
    /// Insert a new asset. Surfaces a storage error on a
    /// `(project_id, asset_name)` uniqueness conflict.
    async fn create_asset(&self, asset: &Asset) -> Result<Asset>;

    /// Fetch an asset by its unique `(project_id, asset_name)` pair.
    async fn get_asset_by_name(&self, project_id: i64, asset_name: &str) -> Result<Option<Asset>>;

    /// Fetch an asset by its surrogate id.
    async fn get_asset_by_id(&self, project_id: i64, asset_id: i64) -> Result<Option<Asset>>;

    /// List all assets of `asset_type` for a project.
    async fn list_assets(&self, project_id: i64, asset_type: AssetType) -> Result<Vec<Asset>>;
}

/// Chunk persistence with pagination (§4.2, §5 ordering guarantees).
#[async_trait]
pub trait ChunkRepository: Send + Sync {
    /// Insert a single chunk.
    async fn create_chunk(&self, chunk: &DataChunk) -> Result<DataChunk>;

    /// Insert many chunks in batches of `batch_size`, preserving input order.
    async fn insert_many_chunks(
        &self,
        chunks: &[DataChunk],
        batch_size: usize,
    ) -> Result<Vec<DataChunk>>;

    /// Delete all chunks for a project, returning the number deleted.
    async fn delete_chunks_by_project(&self, project_id: i64) -> Result<u64>;

    /// List a page of a project's chunks, ordered by chunk id ascending.
    /// `page_no` is 1-based.
    async fn list_chunks(
        &self,
        project_id: i64,
        page_no: u32,
        page_size: u32,
    ) -> Result<Vec<DataChunk>>;

    /// Count a project's chunks.
    async fn count_chunks(&self, project_id: i64) -> Result<u64>;
}
