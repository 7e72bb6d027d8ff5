//! Application bootstrap (§9, §11): assembles [`Services`] from a loaded
//! [`AppConfig`], wiring the Postgres repositories and the tagged provider
//! factories together exactly once at process startup.

use crate::config::AppConfig;
use crate::database::{DatabasePool, PoolSettings};
use crate::factory::{
    EmbeddingProviderFactory, EvaluationProviderFactory, GenerationProviderFactory,
    VectorStoreProviderFactory,
};
use crate::migrations::run_migrations;
use crate::repository::{PostgresAssetRepository, PostgresChunkRepository, PostgresProjectRepository};
use ragcore_application::services::{IngestionSettings, NlpSettings, Services};
use ragcore_application::template_catalog::TemplateCatalog;
use ragcore_domain::error::Result;
use std::path::PathBuf;
use std::sync::Arc;

/// Root directory for per-project upload storage, relative to the process
/// working directory.
const FILES_DIR: &str = "data/uploads";

/// Default number of documents a search/answer request retrieves when it
/// doesn't specify `top_k`.
const DEFAULT_TOP_K: usize = 10;

/// Build a fully wired [`Services`] record from `config`.
///
/// Connects the Postgres pool, runs the relational schema migrations,
/// constructs the three repository implementations against it, and
/// resolves each provider via its tagged factory. Returns an error if the
/// pool can't be built, the schema can't be created, or any provider tag is
/// unrecognized.
pub async fn bootstrap_services(config: &AppConfig) -> Result<Services> {
    let pool = DatabasePool::connect(&config.postgres.connection_url(), PoolSettings::default())?;
    pool.health_check().await?;
    run_migrations(&pool).await?;

    let projects = Arc::new(PostgresProjectRepository::new(pool.clone()));
    let assets = Arc::new(PostgresAssetRepository::new(pool.clone()));
    let chunks = Arc::new(PostgresChunkRepository::new(pool.clone()));

    let vector_store = VectorStoreProviderFactory::create(&config.vector_db, &pool)?;
    let embedder = EmbeddingProviderFactory::create(&config.embedding, &config.gemini_api_key)?;
    let generator = GenerationProviderFactory::create(&config.generation, &config.gemini_api_key)?;
    let evaluator = EvaluationProviderFactory::create(&config.ragas_provider, &config.embedding.model_id)?;

    let templates = Arc::new(TemplateCatalog::built_in(config.lang.default));

    let ingestion = Arc::new(IngestionSettings {
        allowed_mime_types: config.file.allowed_types.clone(),
        max_file_size_mb: config.file.max_size_mb,
        stream_chunk_size_kb: config.file.default_chunk_size_kb as usize,
        default_chunk_size: config.file.default_chunk_size_kb as usize * 1024,
        files_dir: PathBuf::from(FILES_DIR),
    });

    let nlp = Arc::new(NlpSettings {
        default_top_k: DEFAULT_TOP_K,
        default_rrf_k: ragcore_domain::ports::vector_store::DEFAULT_RRF_K,
        default_max_tokens: config.generation.default_max_tokens,
        default_temperature: config.generation.default_temperature,
        index_threshold: config.vector_db.pgvec_index_threshold,
        primary_language: config.lang.primary,
    });

    Ok(Services {
        projects,
        assets,
        chunks,
        vector_store,
        embedder,
        generator,
        evaluator,
        templates,
        ingestion,
        nlp,
    })
}
