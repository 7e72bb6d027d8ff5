//! Postgres-backed [`ChunkRepository`] (§4.2, §5 ordering guarantees).

use crate::database::DatabasePool;
use async_trait::async_trait;
use ragcore_domain::error::{Error, Result};
use ragcore_domain::ports::ChunkRepository;
use ragcore_domain::value_objects::DataChunk;

/// Chunk rows, ordered within an asset by `chunk_order` ascending.
pub struct PostgresChunkRepository {
    pool: DatabasePool,
}

impl PostgresChunkRepository {
    #[must_use]
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn row_to_chunk(row: r2d2_postgres::postgres::Row) -> DataChunk {
    DataChunk {
        id: Some(row.get::<_, i64>(0)),
        project_id: row.get::<_, i64>(1),
        asset_id: row.get::<_, i64>(2),
        chunk_text: row.get::<_, String>(3),
        chunk_order: row.get::<_, i32>(4),
    }
}

#[async_trait]
impl ChunkRepository for PostgresChunkRepository {
    async fn create_chunk(&self, chunk: &DataChunk) -> Result<DataChunk> {
        let pool = self.pool.clone();
        let chunk = chunk.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get_connection()?;
            let row = conn
                .query_one(
                    "INSERT INTO chunks (project_id, asset_id, chunk_text, chunk_order)
                     VALUES ($1, $2, $3, $4)
                     RETURNING id",
                    &[&chunk.project_id, &chunk.asset_id, &chunk.chunk_text, &chunk.chunk_order],
                )
                .map_err(|e| Error::storage_with_source("failed to insert chunk", e))?;
            Ok(DataChunk {
                id: Some(row.get::<_, i64>(0)),
                ..chunk
            })
        })
        .await
        .map_err(|e| Error::internal(format!("chunk task panicked: {e}")))?
    }

    async fn insert_many_chunks(&self, chunks: &[DataChunk], batch_size: usize) -> Result<Vec<DataChunk>> {
        if chunks.is_empty() {
            return Ok(Vec::new());
        }
        let pool = self.pool.clone();
        let chunks = chunks.to_vec();
        let batch_size = batch_size.max(1);

        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get_connection()?;
            let mut persisted = Vec::with_capacity(chunks.len());

            for batch in chunks.chunks(batch_size) {
                let mut txn = conn
                    .transaction()
                    .map_err(|e| Error::storage_with_source("failed to start chunk-insert transaction", e))?;

                for chunk in batch {
                    let row = txn
                        .query_one(
                            "INSERT INTO chunks (project_id, asset_id, chunk_text, chunk_order)
                             VALUES ($1, $2, $3, $4)
                             RETURNING id",
                            &[&chunk.project_id, &chunk.asset_id, &chunk.chunk_text, &chunk.chunk_order],
                        )
                        .map_err(|e| Error::storage_with_source("failed to insert chunk batch row", e))?;
                    persisted.push(DataChunk {
                        id: Some(row.get::<_, i64>(0)),
                        ..chunk.clone()
                    });
                }

                txn.commit()
                    .map_err(|e| Error::storage_with_source("failed to commit chunk batch", e))?;
            }

            Ok(persisted)
        })
        .await
        .map_err(|e| Error::internal(format!("chunk task panicked: {e}")))?
    }

    async fn delete_chunks_by_project(&self, project_id: i64) -> Result<u64> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get_connection()?;
            let affected = conn
                .execute("DELETE FROM chunks WHERE project_id = $1", &[&project_id])
                .map_err(|e| Error::storage_with_source("failed to delete project chunks", e))?;
            Ok(affected)
        })
        .await
        .map_err(|e| Error::internal(format!("chunk task panicked: {e}")))?
    }

    async fn list_chunks(&self, project_id: i64, page_no: u32, page_size: u32) -> Result<Vec<DataChunk>> {
        let pool = self.pool.clone();
        let offset = i64::from(page_no.saturating_sub(1)) * i64::from(page_size);
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get_connection()?;
            let rows = conn
                .query(
                    "SELECT id, project_id, asset_id, chunk_text, chunk_order
                     FROM chunks WHERE project_id = $1
                     ORDER BY id ASC
                     LIMIT $2 OFFSET $3",
                    &[&project_id, &i64::from(page_size), &offset],
                )
                .map_err(|e| Error::storage_with_source("failed to list chunks", e))?;
            Ok(rows.into_iter().map(row_to_chunk).collect())
        })
        .await
        .map_err(|e| Error::internal(format!("chunk task panicked: {e}")))?
    }

    async fn count_chunks(&self, project_id: i64) -> Result<u64> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get_connection()?;
            let row = conn
                .query_one("SELECT COUNT(*) FROM chunks WHERE project_id = $1", &[&project_id])
                .map_err(|e| Error::storage_with_source("failed to count chunks", e))?;
            Ok(row.get::<_, i64>(0) as u64)
        })
        .await
        .map_err(|e| Error::internal(format!("chunk task panicked: {e}")))?
    }
}
