//! Typed configuration sections assembled into [`AppConfig`] (§6, §11).
//!
//! Breaks a flat environment-variable namespace into purpose-grouped
//! structs (`PostgresConfig`, `EmbeddingConfig`, `GenerationConfig`, ...)
//! rather than one large struct with every field at the top level.

use ragcore_domain::value_objects::Language;
use serde::{Deserialize, Serialize};

/// Upload intake settings (`FILE_*`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    /// Accepted MIME types.
    pub allowed_types: Vec<String>,
    /// Maximum upload size, in megabytes.
    pub max_size_mb: u64,
    /// Streaming write chunk size, in kilobytes.
    pub default_chunk_size_kb: u64,
}

/// Generation LLM settings (`GENERATION_*`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Provider tag, e.g. `"GEMINI"`.
    pub backend: String,
    /// Model identifier.
    pub model_id: String,
    /// Default max output tokens when a request doesn't override it.
    pub default_max_tokens: u32,
    /// Default sampling temperature when a request doesn't override it.
    pub default_temperature: f32,
    /// Character budget a prompt is truncated to before generation (§12,
    /// `process_text` truncation guard).
    pub default_input_max_characters: usize,
    /// System instructions prefacing every prompt.
    pub system_instructions: String,
}

/// Embedding model settings (`EMBEDDING_*`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Provider tag, e.g. `"GEMINI"`.
    pub backend: String,
    /// Model identifier.
    pub model_id: String,
    /// Declared embedding dimension.
    pub model_size: usize,
}

/// Vector store settings (`VECTOR_DB_*`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorDbConfig {
    /// Provider tag, e.g. `"PGVECTOR"`.
    pub backend: String,
    /// Distance function name (e.g. `"cosine"`).
    pub distance_method: String,
    /// Row-count threshold past which indexes are created.
    pub pgvec_index_threshold: u64,
}

/// Postgres connection settings (`POSTGRES_*`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostgresConfig {
    /// Connecting role.
    pub username: String,
    /// Role password.
    pub password: String,
    /// Server host.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Database name.
    pub main_database: String,
}

impl PostgresConfig {
    /// The `postgresql://` connection string built from this config's fields.
    #[must_use]
    pub fn connection_url(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.main_database
        )
    }
}

/// Language defaults (`PRIMARY_LANG`, `DEFAULT_LANG`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LangConfig {
    /// The language used when a request doesn't specify one.
    pub primary: Language,
    /// Fallback language for template lookups.
    pub default: Language,
}

/// Top-level application configuration, assembled from the flat environment
/// namespace of §6 by [`crate::config::loader::ConfigLoader`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name, surfaced in logs.
    pub app_name: String,
    /// Application version, surfaced in logs.
    pub app_version: String,
    /// API key for the Gemini-family providers.
    pub gemini_api_key: String,
    /// Upload intake settings.
    pub file: FileConfig,
    /// Generation LLM settings.
    pub generation: GenerationConfig,
    /// Embedding model settings.
    pub embedding: EmbeddingConfig,
    /// Evaluation provider tag (`RAGAS_PROVIDER`).
    pub ragas_provider: String,
    /// Vector store settings.
    pub vector_db: VectorDbConfig,
    /// Postgres connection settings.
    pub postgres: PostgresConfig,
    /// Language defaults.
    pub lang: LangConfig,
}
