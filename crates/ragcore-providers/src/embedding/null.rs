//! No-op embedding provider, for local development and tests without a
//! real embedding backend (§11, `NULL` factory tag).

use async_trait::async_trait;
use ragcore_domain::error::Result;
use ragcore_domain::ports::{DocumentType, EmbeddingProvider};

/// Always returns a zero vector of the configured dimension.
pub struct NullEmbeddingProvider {
    dimension: usize,
}

impl NullEmbeddingProvider {
    #[must_use]
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

#[async_trait]
impl EmbeddingProvider for NullEmbeddingProvider {
    async fn embed_text(&self, _text: &str, _document_type: DocumentType) -> Result<Vec<f32>> {
        Ok(vec![0.0; self.dimension])
    }

    async fn embed_batch(&self, texts: &[String], _document_type: DocumentType) -> Result<Vec<Vec<f32>>> {
        Ok(vec![vec![0.0; self.dimension]; texts.len()])
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}
