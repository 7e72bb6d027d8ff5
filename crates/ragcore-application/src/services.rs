//! The immutable services record threaded through request handlers (§9,
//! "Global app state" — replacing a process-wide mutable application
//! object with a constructed-once, cloned-cheaply bundle of `Arc`s).

use crate::template_catalog::TemplateCatalog;
use ragcore_domain::ports::{
    AssetRepository, ChunkRepository, EmbeddingProvider, EvaluationProvider, GenerationProvider,
    ProjectRepository, VectorStoreProvider,
};
use std::sync::Arc;

/// Configuration the ingestion controller needs that isn't provider- or
/// repository-shaped.
#[derive(Debug, Clone)]
pub struct IngestionSettings {
    /// MIME types accepted for upload.
    pub allowed_mime_types: Vec<String>,
    /// Maximum upload size, in megabytes.
    pub max_file_size_mb: u64,
    /// Streaming write chunk size, in kilobytes.
    pub stream_chunk_size_kb: usize,
    /// Default chunk size (characters) when a request doesn't override it.
    pub default_chunk_size: usize,
    /// Root directory under which per-project upload directories live.
    pub files_dir: std::path::PathBuf,
}

/// Configuration the NLP controller needs beyond its providers.
#[derive(Debug, Clone)]
pub struct NlpSettings {
    /// Default number of documents to retrieve.
    pub default_top_k: usize,
    /// Default Reciprocal-Rank-Fusion constant.
    pub default_rrf_k: u32,
    /// Default generation max tokens.
    pub default_max_tokens: u32,
    /// Default generation temperature.
    pub default_temperature: f32,
    /// Vector-store-index creation threshold (row count).
    pub index_threshold: u64,
    /// Primary language used when a request doesn't specify one.
    pub primary_language: ragcore_domain::value_objects::Language,
}

/// All dependencies the application layer needs, constructed once at
/// startup and cloned (cheaply — everything inside is an `Arc`) into every
/// request-scoped controller instance.
#[derive(Clone)]
pub struct Services {
    /// Project repository.
    pub projects: Arc<dyn ProjectRepository>,
    /// Asset repository.
    pub assets: Arc<dyn AssetRepository>,
    /// Chunk repository.
    pub chunks: Arc<dyn ChunkRepository>,
    /// Vector store provider.
    pub vector_store: Arc<dyn VectorStoreProvider>,
    /// Embedding provider.
    pub embedder: Arc<dyn EmbeddingProvider>,
    /// Generation LLM provider.
    pub generator: Arc<dyn GenerationProvider>,
    /// Evaluation provider.
    pub evaluator: Arc<dyn EvaluationProvider>,
    /// Prompt template catalog.
    pub templates: Arc<TemplateCatalog>,
    /// Ingestion-specific settings.
    pub ingestion: Arc<IngestionSettings>,
    /// NLP-specific settings.
    pub nlp: Arc<NlpSettings>,
}
