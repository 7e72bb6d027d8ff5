//! Vector store port — the hardest subsystem (§4.1).

use crate::error::Result;
use crate::value_objects::{CollectionInfo, Language, RetrievedDocument};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

/// Default batch size for `insert_many` when the caller doesn't override it.
pub const DEFAULT_INSERT_BATCH_SIZE: usize = 50;
/// Default Reciprocal-Rank-Fusion constant.
pub const DEFAULT_RRF_K: u32 = 60;

/// A hybrid (dense + lexical) vector collection store.
///
/// One collection per project; the collection name is a pure function of
/// the project id (§4.4). Implementations must honor the failure semantics
/// of §4.1: missing collections on insert/search report a "not found"
/// result and never auto-create, malformed vector dimensions roll back the
/// whole batch, and index-creation failure is logged but non-fatal.
#[async_trait]
pub trait VectorStoreProvider: Send + Sync {
    /// Ensure the vector extension is enabled. Idempotent.
    async fn connect(&self) -> Result<()>;

    /// Create a collection with `dimension`-wide vectors.
    ///
    /// If `reset` is true, any existing collection of this name is dropped
    /// first. Installs the `fts_tokens` derivation trigger. Index creation
    /// is attempted immediately only if the (empty) collection already
    /// meets the configured threshold, which in practice means never on a
    /// fresh collection — see [`VectorStoreProvider::maybe_create_indexes`].
    async fn create_collection(&self, name: &str, dimension: usize, reset: bool) -> Result<()>;

    /// Drop a collection. Idempotent — absent collections are not an error.
    async fn delete_collection(&self, name: &str) -> Result<()>;

    /// Fetch metadata about a collection, or `None` if it does not exist.
    async fn collection_info(&self, name: &str) -> Result<Option<CollectionInfo>>;

    /// List the names of all collections managed by this store (§12).
    async fn list_collections(&self) -> Result<Vec<String>>;

    /// Insert a single record.
    ///
    /// Preconditions (collection exists) are the same as `insert_many`;
    /// violations report failure and insert nothing.
    async fn insert_one(
        &self,
        collection: &str,
        text: &str,
        vector: &[f32],
        metadata: Option<HashMap<String, Value>>,
        chunk_id: i64,
        language: Language,
    ) -> Result<()> {
        self.insert_many(
            collection,
            &[text.to_string()],
            &[vector.to_vec()],
            Some(vec![metadata.unwrap_or_default()]),
            &[chunk_id],
            DEFAULT_INSERT_BATCH_SIZE,
            language,
        )
        .await
    }

    /// Insert many records, grouped into batches of `batch_size`.
    ///
    /// Precondition: `texts.len() == vectors.len() == chunk_ids.len()` and
    /// the collection exists; violated preconditions report failure and
    /// insert nothing. Each batch commits as a unit. After a successful
    /// insert the store attempts [`VectorStoreProvider::maybe_create_indexes`].
    async fn insert_many(
        &self,
        collection: &str,
        texts: &[String],
        vectors: &[Vec<f32>],
        metadatas: Option<Vec<HashMap<String, Value>>>,
        chunk_ids: &[i64],
        batch_size: usize,
        language: Language,
    ) -> Result<()>;

    /// Hybrid retrieval via Reciprocal Rank Fusion (§4.1). Returns at most
    /// `top_k` documents in descending fused-score order.
    async fn search(
        &self,
        collection: &str,
        query_text: &str,
        query_vector: &[f32],
        top_k: usize,
        rrf_k: u32,
    ) -> Result<Vec<RetrievedDocument>>;

    /// Create the dense (ANN) and lexical (GIN) indexes if the collection's
    /// row count has reached the configured threshold and they don't
    /// already exist. Index creation failure must be logged but must not
    /// fail the caller — sequential scan remains correct, only slower.
    async fn maybe_create_indexes(&self, collection: &str) -> Result<()>;

    /// Unconditionally drop both indexes (if present), then re-run the same
    /// threshold-gated creation as [`VectorStoreProvider::maybe_create_indexes`]
    /// (§12, `reset_vector_index`).
    async fn reset_indexes(&self, collection: &str) -> Result<()>;

    /// A short identifier for logging/metrics (e.g. `"pgvector"`).
    fn provider_name(&self) -> &str;
}
