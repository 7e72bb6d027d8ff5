//! No-op vector store provider, for local development and tests without a
//! real Postgres/pgvector backend (§11, `NULL` factory tag).

use async_trait::async_trait;
use ragcore_domain::error::Result;
use ragcore_domain::value_objects::{CollectionInfo, Language, RetrievedDocument};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

use ragcore_domain::ports::VectorStoreProvider;

/// Collections are tracked in memory (name -> row count) but no vectors are
/// ever actually stored; search always reports no results.
pub struct NullVectorStoreProvider {
    collections: Mutex<HashMap<String, i64>>,
}

impl NullVectorStoreProvider {
    #[must_use]
    pub fn new() -> Self {
        Self {
            collections: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for NullVectorStoreProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorStoreProvider for NullVectorStoreProvider {
    async fn connect(&self) -> Result<()> {
        Ok(())
    }

    async fn create_collection(&self, name: &str, _dimension: usize, reset: bool) -> Result<()> {
        let mut collections = self.collections.lock().unwrap();
        if reset {
            collections.remove(name);
        }
        collections.entry(name.to_string()).or_insert(0);
        Ok(())
    }

    async fn delete_collection(&self, name: &str) -> Result<()> {
        self.collections.lock().unwrap().remove(name);
        Ok(())
    }

    async fn collection_info(&self, name: &str) -> Result<Option<CollectionInfo>> {
        let collections = self.collections.lock().unwrap();
        Ok(collections.get(name).map(|&record_count| CollectionInfo {
            schema_name: "public".to_string(),
            table_name: name.to_string(),
            owner: "null".to_string(),
            tablespace: None,
            has_indexes: false,
            record_count,
        }))
    }

    async fn list_collections(&self) -> Result<Vec<String>> {
        Ok(self.collections.lock().unwrap().keys().cloned().collect())
    }

    async fn insert_many(
        &self,
        collection: &str,
        texts: &[String],
        _vectors: &[Vec<f32>],
        _metadatas: Option<Vec<HashMap<String, Value>>>,
        _chunk_ids: &[i64],
        _batch_size: usize,
        _language: Language,
    ) -> Result<()> {
        if let Some(count) = self.collections.lock().unwrap().get_mut(collection) {
            *count += texts.len() as i64;
        }
        Ok(())
    }

    async fn search(
        &self,
        _collection: &str,
        _query_text: &str,
        _query_vector: &[f32],
        _top_k: usize,
        _rrf_k: u32,
    ) -> Result<Vec<RetrievedDocument>> {
        Ok(Vec::new())
    }

    async fn maybe_create_indexes(&self, _collection: &str) -> Result<()> {
        Ok(())
    }

    async fn reset_indexes(&self, _collection: &str) -> Result<()> {
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_many_increments_tracked_row_count() {
        let provider = NullVectorStoreProvider::new();
        provider.create_collection("c1", 4, false).await.unwrap();
        provider
            .insert_many(
                "c1",
                &["a".to_string(), "b".to_string()],
                &[vec![0.0; 4], vec![0.0; 4]],
                None,
                &[1, 2],
                50,
                Language::English,
            )
            .await
            .unwrap();

        let info = provider.collection_info("c1").await.unwrap().unwrap();
        assert_eq!(info.record_count, 2);
    }

    #[tokio::test]
    async fn search_always_returns_empty() {
        let provider = NullVectorStoreProvider::new();
        let results = provider.search("c1", "q", &[0.0; 4], 5, 60).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn reset_on_create_collection_clears_previous_rows() {
        let provider = NullVectorStoreProvider::new();
        provider.create_collection("c1", 4, false).await.unwrap();
        provider
            .insert_many("c1", &["a".to_string()], &[vec![0.0; 4]], None, &[1], 50, Language::English)
            .await
            .unwrap();
        provider.create_collection("c1", 4, true).await.unwrap();

        let info = provider.collection_info("c1").await.unwrap().unwrap();
        assert_eq!(info.record_count, 0);
    }
}
