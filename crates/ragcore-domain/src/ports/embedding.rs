//! Embedding provider port (§4.5).

use crate::error::Result;
use async_trait::async_trait;

/// Distinguishes embeddings meant for indexing versus querying. Some
/// providers (Gemini's `text-embedding-004`) produce measurably better
/// retrieval when the two are embedded with different task hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentType {
    /// Embed as a document destined for the index.
    Document,
    /// Embed as a query used to search the index.
    Query,
}

/// A pluggable embedding model.
///
/// `dimension()` is a declared attribute fixed at construction time (the
/// provider is configured with one model id and therefore one dimension for
/// its lifetime); the vector store uses it to size new collections.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text.
    async fn embed_text(&self, text: &str, document_type: DocumentType) -> Result<Vec<f32>>;

    /// Embed a batch of texts in one round trip where the provider allows it.
    async fn embed_batch(
        &self,
        texts: &[String],
        document_type: DocumentType,
    ) -> Result<Vec<Vec<f32>>>;

    /// The fixed dimensionality of vectors this provider produces.
    fn dimension(&self) -> usize;

    /// A short identifier for logging/metrics (e.g. `"gemini"`).
    fn provider_name(&self) -> &str;
}
