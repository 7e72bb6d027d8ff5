//! `pgvector`-backed hybrid (dense + lexical) vector store (§4.1).
//!
//! Index names are derived from a single `embed_index_name` helper used
//! everywhere one is needed, rather than two similarly-named fields that
//! can drift out of sync. The per-row language used for full-text search is
//! always passed as a bound query parameter, never spliced into SQL text.

use async_trait::async_trait;
use r2d2::Pool;
use r2d2_postgres::postgres::NoTls;
use r2d2_postgres::PostgresConnectionManager;
use ragcore_domain::constants::COLLECTION_NAME_PREFIX;
use ragcore_domain::error::{Error, Result};
use ragcore_domain::ports::VectorStoreProvider;
use ragcore_domain::value_objects::{CollectionInfo, Language, RetrievedDocument};
use serde_json::Value;
use std::collections::HashMap;

type PgPool = Pool<PostgresConnectionManager<NoTls>>;

fn distance_config(method: &str) -> Result<(&'static str, &'static str)> {
    match method.to_ascii_lowercase().as_str() {
        "cosine" => Ok(("vector_cosine_ops", "<=>")),
        "dot" | "inner_product" => Ok(("vector_ip_ops", "<#>")),
        "l2" | "euclidean" => Ok(("vector_l2_ops", "<->")),
        other => Err(Error::config(format!("unsupported vector distance method '{other}'"))),
    }
}

fn embed_index_name(collection: &str) -> String {
    format!("{COLLECTION_NAME_PREFIX}_{collection}_vector_idx")
}

fn gin_index_name(collection: &str) -> String {
    format!("{COLLECTION_NAME_PREFIX}_{collection}_fts_idx")
}

fn to_pg_vector(vector: &[f32]) -> pgvector::Vector {
    pgvector::Vector::from(vector.to_vec())
}

/// A per-project collection is a dedicated table named by
/// `ragcore_domain::constants::collection_name`.
pub struct PgVectorStoreProvider {
    pool: PgPool,
    distance_method: String,
    index_threshold: u64,
}

impl PgVectorStoreProvider {
    /// Build a provider over an already-configured connection pool.
    #[must_use]
    pub fn new(pool: PgPool, distance_method: String, index_threshold: u64) -> Self {
        Self {
            pool,
            distance_method,
            index_threshold,
        }
    }

}

#[async_trait]
impl VectorStoreProvider for PgVectorStoreProvider {
    async fn connect(&self) -> Result<()> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| Error::storage_with_source("failed to acquire Postgres connection", e))?;
            conn.execute("CREATE EXTENSION IF NOT EXISTS vector", &[])
                .map_err(|e| Error::vector_db(format!("failed to enable vector extension: {e}")))?;
            Ok(())
        })
        .await
        .map_err(|e| Error::internal(format!("vector store task panicked: {e}")))?
    }

    async fn create_collection(&self, name: &str, dimension: usize, reset: bool) -> Result<()> {
        if reset {
            self.delete_collection(name).await?;
        }

        let pool = self.pool.clone();
        let name = name.to_string();
        let name_for_index = name.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| Error::storage_with_source("failed to acquire Postgres connection", e))?;

            conn.batch_execute(&format!(
                "CREATE TABLE IF NOT EXISTS {name} (
                    id BIGSERIAL PRIMARY KEY,
                    text TEXT,
                    vector VECTOR({dimension}),
                    chunk_id BIGINT,
                    language TEXT DEFAULT 'english',
                    fts_tokens TSVECTOR,
                    metadata JSONB DEFAULT '{{}}'
                );
                CREATE OR REPLACE FUNCTION {name}_tsvector_trigger() RETURNS trigger AS $$
                BEGIN
                    NEW.fts_tokens := to_tsvector(NEW.language::regconfig, NEW.text);
                    RETURN NEW;
                END
                $$ LANGUAGE plpgsql;
                DROP TRIGGER IF EXISTS {name}_tsvector_update ON {name};
                CREATE TRIGGER {name}_tsvector_update
                    BEFORE INSERT OR UPDATE ON {name}
                    FOR EACH ROW EXECUTE FUNCTION {name}_tsvector_trigger();"
            ))
            .map_err(|e| Error::vector_db(format!("failed to create collection '{name}': {e}")))?;

            Ok(())
        })
        .await
        .map_err(|e| Error::internal(format!("vector store task panicked: {e}")))??;

        let _ = self.maybe_create_indexes(&name_for_index).await;
        Ok(())
    }

    async fn delete_collection(&self, name: &str) -> Result<()> {
        let pool = self.pool.clone();
        let name = name.to_string();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| Error::storage_with_source("failed to acquire Postgres connection", e))?;
            conn.batch_execute(&format!(
                "DROP TABLE IF EXISTS {name} CASCADE;
                 DROP FUNCTION IF EXISTS {name}_tsvector_trigger() CASCADE;"
            ))
            .map_err(|e| Error::vector_db(format!("failed to drop collection '{name}': {e}")))?;
            Ok(())
        })
        .await
        .map_err(|e| Error::internal(format!("vector store task panicked: {e}")))?
    }

    async fn collection_info(&self, name: &str) -> Result<Option<CollectionInfo>> {
        let pool = self.pool.clone();
        let name = name.to_string();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| Error::storage_with_source("failed to acquire Postgres connection", e))?;

            let table_row = conn
                .query_opt(
                    "SELECT schemaname, tablename, tableowner, tablespace, hasindexes
                     FROM pg_tables WHERE tablename = $1",
                    &[&name],
                )
                .map_err(|e| Error::vector_db(format!("failed to inspect collection '{name}': {e}")))?;

            let Some(row) = table_row else {
                return Ok(None);
            };

            let count_row = conn
                .query_one(&format!("SELECT COUNT(*) FROM {name}"), &[])
                .map_err(|e| Error::vector_db(format!("failed to count rows of '{name}': {e}")))?;

            Ok(Some(CollectionInfo {
                schema_name: row.get::<_, String>(0),
                table_name: row.get::<_, String>(1),
                owner: row.get::<_, String>(2),
                tablespace: row.get::<_, Option<String>>(3),
                has_indexes: row.get::<_, bool>(4),
                record_count: count_row.get::<_, i64>(0),
            }))
        })
        .await
        .map_err(|e| Error::internal(format!("vector store task panicked: {e}")))?
    }

    async fn list_collections(&self) -> Result<Vec<String>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| Error::storage_with_source("failed to acquire Postgres connection", e))?;
            let pattern = format!("{COLLECTION_NAME_PREFIX}%");
            let rows = conn
                .query("SELECT tablename FROM pg_tables WHERE tablename LIKE $1", &[&pattern])
                .map_err(|e| Error::vector_db(format!("failed to list collections: {e}")))?;
            Ok(rows.into_iter().map(|row| row.get::<_, String>(0)).collect())
        })
        .await
        .map_err(|e| Error::internal(format!("vector store task panicked: {e}")))?
    }

    async fn insert_many(
        &self,
        collection: &str,
        texts: &[String],
        vectors: &[Vec<f32>],
        metadatas: Option<Vec<HashMap<String, Value>>>,
        chunk_ids: &[i64],
        batch_size: usize,
        language: Language,
    ) -> Result<()> {
        if texts.len() != vectors.len() || texts.len() != chunk_ids.len() {
            return Err(Error::validation(
                "insert_many requires texts, vectors, and chunk_ids of equal length",
            ));
        }
        let metadatas = metadatas.unwrap_or_else(|| vec![HashMap::new(); texts.len()]);
        if metadatas.len() != texts.len() {
            return Err(Error::validation("insert_many metadata length must match texts length"));
        }

        let pool = self.pool.clone();
        let collection = collection.to_string();
        let collection_for_index = collection.clone();
        let texts = texts.to_vec();
        let vectors = vectors.to_vec();
        let chunk_ids = chunk_ids.to_vec();
        let batch_size = batch_size.max(1);
        let regconfig = language.pg_regconfig();

        tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| Error::storage_with_source("failed to acquire Postgres connection", e))?;

            let indices: Vec<usize> = (0..texts.len()).collect();
            for batch in indices.chunks(batch_size) {
                let mut txn = conn
                    .transaction()
                    .map_err(|e| Error::storage_with_source("failed to start vector insert transaction", e))?;

                for &i in batch {
                    let metadata_json = serde_json::to_string(&metadatas[i]).unwrap_or_else(|_| "{}".to_string());
                    txn.execute(
                        &format!(
                            "INSERT INTO {collection} (text, vector, chunk_id, language, metadata)
                             VALUES ($1, $2, $3, $4, $5::jsonb)"
                        ),
                        &[
                            &texts[i],
                            &to_pg_vector(&vectors[i]),
                            &chunk_ids[i],
                            &regconfig,
                            &metadata_json,
                        ],
                    )
                    .map_err(|e| Error::vector_db(format!("failed to insert into '{collection}': {e}")))?;
                }

                txn.commit()
                    .map_err(|e| Error::storage_with_source("failed to commit vector insert batch", e))?;
            }

            Ok(())
        })
        .await
        .map_err(|e| Error::internal(format!("vector store task panicked: {e}")))??;

        let _ = self.maybe_create_indexes(&collection_for_index).await;
        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        query_text: &str,
        query_vector: &[f32],
        top_k: usize,
        rrf_k: u32,
    ) -> Result<Vec<RetrievedDocument>> {
        let (_, operator) = distance_config(&self.distance_method)?;
        let pool = self.pool.clone();
        let collection = collection.to_string();
        let query_text = query_text.to_string();
        let query_vector = to_pg_vector(query_vector);
        let top_k = top_k as i64;
        let rrf_k = f64::from(rrf_k);

        tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| Error::storage_with_source("failed to acquire Postgres connection", e))?;

            let sql = format!(
                "WITH vector_results AS (
                    SELECT id, ROW_NUMBER() OVER (ORDER BY vector {operator} $1) AS rank
                    FROM {collection}
                    LIMIT $2
                ),
                keyword_results AS (
                    SELECT id, ROW_NUMBER() OVER (ORDER BY ts_rank_cd(fts_tokens, plainto_tsquery($3)) DESC) AS rank
                    FROM {collection}
                    WHERE fts_tokens @@ plainto_tsquery($3)
                    LIMIT $2
                )
                SELECT
                    t.text AS text,
                    (COALESCE(1.0 / ($4 + v.rank), 0.0) + COALESCE(1.0 / ($4 + k.rank), 0.0)) AS score
                FROM vector_results v
                FULL OUTER JOIN keyword_results k ON v.id = k.id
                JOIN {collection} t ON t.id = COALESCE(v.id, k.id)
                ORDER BY score DESC
                LIMIT $2"
            );

            let rows = conn
                .query(&sql, &[&query_vector, &top_k, &query_text, &rrf_k])
                .map_err(|e| Error::vector_db(format!("hybrid search against '{collection}' failed: {e}")))?;

            Ok(rows
                .into_iter()
                .map(|row| RetrievedDocument::new(row.get::<_, String>(0), row.get::<_, f64>(1)))
                .collect())
        })
        .await
        .map_err(|e| Error::internal(format!("vector store task panicked: {e}")))?
    }

    async fn maybe_create_indexes(&self, collection: &str) -> Result<()> {
        let pool = self.pool.clone();
        let collection = collection.to_string();
        let (ops_class, _) = distance_config(&self.distance_method)?;
        let threshold = self.index_threshold;
        let embed_index = embed_index_name(&collection);
        let gin_index = gin_index_name(&collection);

        tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| Error::storage_with_source("failed to acquire Postgres connection", e))?;

            let count_row = conn
                .query_one(&format!("SELECT COUNT(*) FROM {collection}"), &[])
                .map_err(|e| Error::vector_db(format!("failed to count rows of '{collection}': {e}")))?;
            let count = count_row.get::<_, i64>(0) as u64;

            if count < threshold {
                tracing::debug!(collection, count, threshold, "below index threshold, skipping index creation");
                return Ok(());
            }

            if let Err(e) = conn.execute(
                &format!("CREATE INDEX IF NOT EXISTS {embed_index} ON {collection} USING hnsw (vector {ops_class})"),
                &[],
            ) {
                tracing::warn!(collection, error = %e, "failed to create vector index, continuing with sequential scan");
            }
            if let Err(e) = conn.execute(
                &format!("CREATE INDEX IF NOT EXISTS {gin_index} ON {collection} USING GIN (fts_tokens)"),
                &[],
            ) {
                tracing::warn!(collection, error = %e, "failed to create lexical index, continuing with sequential scan");
            }

            Ok(())
        })
        .await
        .map_err(|e| Error::internal(format!("vector store task panicked: {e}")))?
    }

    async fn reset_indexes(&self, collection: &str) -> Result<()> {
        let pool = self.pool.clone();
        let collection_owned = collection.to_string();
        let (ops_class, _) = distance_config(&self.distance_method)?;
        let embed_index = embed_index_name(&collection_owned);
        let gin_index = gin_index_name(&collection_owned);

        tokio::task::spawn_blocking({
            let collection = collection_owned.clone();
            move || {
                let mut conn = pool
                    .get()
                    .map_err(|e| Error::storage_with_source("failed to acquire Postgres connection", e))?;
                conn.batch_execute(&format!("DROP INDEX IF EXISTS {embed_index}; DROP INDEX IF EXISTS {gin_index};"))
                    .map_err(|e| Error::vector_db(format!("failed to drop indexes on '{collection}': {e}")))?;
                conn.execute(
                    &format!(
                        "CREATE INDEX IF NOT EXISTS {embed_index} ON {collection} USING hnsw (vector {ops_class})"
                    ),
                    &[],
                )
                .map_err(|e| Error::vector_db(format!("failed to recreate vector index on '{collection}': {e}")))?;
                conn.execute(
                    &format!("CREATE INDEX IF NOT EXISTS {gin_index} ON {collection} USING GIN (fts_tokens)"),
                    &[],
                )
                .map_err(|e| Error::vector_db(format!("failed to recreate lexical index on '{collection}': {e}")))?;
                Ok(())
            }
        })
        .await
        .map_err(|e| Error::internal(format!("vector store task panicked: {e}")))?
    }

    fn provider_name(&self) -> &str {
        "pgvector"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_config_maps_known_methods() {
        assert_eq!(distance_config("cosine").unwrap(), ("vector_cosine_ops", "<=>"));
        assert_eq!(distance_config("DOT").unwrap(), ("vector_ip_ops", "<#>"));
        assert_eq!(distance_config("l2").unwrap(), ("vector_l2_ops", "<->"));
    }

    #[test]
    fn distance_config_rejects_unknown_method() {
        assert!(distance_config("manhattan").is_err());
    }

    #[test]
    fn index_names_are_derived_consistently() {
        assert_eq!(embed_index_name("ragcore_collection_1"), "ragcore_ragcore_collection_1_vector_idx");
        assert_eq!(gin_index_name("ragcore_collection_1"), "ragcore_ragcore_collection_1_fts_idx");
    }

    #[test]
    fn to_pg_vector_preserves_element_order() {
        let vector = to_pg_vector(&[0.1, 0.2, 0.3]);
        assert_eq!(vector.to_vec(), vec![0.1_f32, 0.2, 0.3]);
    }
}
