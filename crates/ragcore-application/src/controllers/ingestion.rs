//! Ingestion controller (§4.3): validate → safe path allocation → streamed
//! write → chunking → batched chunk persistence.

use crate::chunking::{chunk_text, ChunkingOptions};
use crate::sanitize::build_stored_name;
use crate::services::Services;
use ragcore_domain::error::{Error, Result};
use ragcore_domain::signal::Signal;
use ragcore_domain::value_objects::{Asset, AssetType, DataChunk};
use std::path::PathBuf;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};

/// Outcome of `upload_file`.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    /// The outcome signal.
    pub signal: Signal,
    /// The persisted asset, present only on `FileUploadSuccess`.
    pub asset: Option<Asset>,
}

/// Outcome of `process`.
#[derive(Debug, Clone, Default)]
pub struct ProcessOutcome {
    /// The outcome signal.
    pub signal: Option<Signal>,
    /// Number of assets successfully chunked and persisted.
    pub files_processed: usize,
    /// Total chunk rows created across all processed assets.
    pub records_created: usize,
}

/// Orchestrates file intake: validation, on-disk capture, chunking and
/// batched chunk persistence.
pub struct IngestionController {
    services: Services,
}

impl IngestionController {
    /// Build a controller over the shared services record.
    #[must_use]
    pub fn new(services: Services) -> Self {
        Self { services }
    }

    /// Validate `mime_type`/`size_bytes` against the configured allow-list
    /// and maximum size. Pure — no persistence side effect (§7).
    #[must_use]
    pub fn validate_file(&self, mime_type: &str, size_bytes: u64) -> Signal {
        if !self
            .services
            .ingestion
            .allowed_mime_types
            .iter()
            .any(|allowed| allowed == mime_type)
        {
            return Signal::FileTypeNotSupported;
        }
        let max_bytes = self.services.ingestion.max_file_size_mb * 1024 * 1024;
        if size_bytes > max_bytes {
            return Signal::FileSizeExceeded;
        }
        Signal::FileValidateSuccessfully
    }

    /// The on-disk directory holding a project's uploaded files,
    /// `files_dir/<project_id>/`, created on first use (§12).
    fn project_files_dir(&self, project_id: i64) -> PathBuf {
        self.services.ingestion.files_dir.join(project_id.to_string())
    }

    /// Validate, stream `reader` to a uniquely named file under the
    /// project's directory, and persist the resulting `Asset` row.
    pub async fn upload_file(
        &self,
        project_id: i64,
        original_file_name: &str,
        mime_type: &str,
        size_bytes: u64,
        mut reader: impl AsyncRead + Unpin,
    ) -> Result<UploadOutcome> {
        let validation = self.validate_file(mime_type, size_bytes);
        if validation != Signal::FileValidateSuccessfully {
            return Ok(UploadOutcome {
                signal: validation,
                asset: None,
            });
        }

        self.services.projects.get_or_create_project(project_id).await?;

        let dir = self.project_files_dir(project_id);
        if let Err(source) = tokio::fs::create_dir_all(&dir).await {
            tracing::warn!(error = %source, path = %dir.display(), "failed to create project directory");
            return Ok(UploadOutcome {
                signal: Signal::FileUploadFailed,
                asset: None,
            });
        }

        let stored_name = loop {
            let candidate = build_stored_name(original_file_name);
            if self
                .services
                .assets
                .get_asset_by_name(project_id, &candidate)
                .await?
                .is_none()
                && !tokio::fs::try_exists(dir.join(&candidate)).await.unwrap_or(false)
            {
                break candidate;
            }
        };

        let destination = dir.join(&stored_name);
        let write_result = self.stream_to_disk(&mut reader, &destination).await;

        let written_bytes = match write_result {
            Ok(bytes) => bytes,
            Err(err) => {
                let _ = tokio::fs::remove_file(&destination).await;
                tracing::warn!(error = %err, path = %destination.display(), "upload stream write failed");
                return Ok(UploadOutcome {
                    signal: Signal::FileUploadFailed,
                    asset: None,
                });
            }
        };

        let asset = Asset::new(project_id, stored_name, written_bytes as i64);
        let asset = self.services.assets.create_asset(&asset).await?;

        Ok(UploadOutcome {
            signal: Signal::FileUploadSuccess,
            asset: Some(asset),
        })
    }

    /// Stream `reader` to `destination` in configured-size chunks, returning
    /// the total bytes written. On any I/O error the partial file is left
    /// for the caller to clean up (§4.3).
    async fn stream_to_disk(
        &self,
        reader: &mut (impl AsyncRead + Unpin),
        destination: &std::path::Path,
    ) -> Result<u64> {
        let mut file = tokio::fs::File::create(destination)
            .await
            .map_err(|e| Error::io_with_source("failed to create destination file", e))?;

        let buf_size = self.services.ingestion.stream_chunk_size_kb * 1024;
        let mut buf = vec![0u8; buf_size.max(1)];
        let mut total = 0u64;

        loop {
            let read = reader
                .read(&mut buf)
                .await
                .map_err(|e| Error::io_with_source("failed to read upload stream", e))?;
            if read == 0 {
                break;
            }
            file.write_all(&buf[..read])
                .await
                .map_err(|e| Error::io_with_source("failed to write upload stream", e))?;
            total += read as u64;
        }
        file.flush()
            .await
            .map_err(|e| Error::io_with_source("failed to flush upload stream", e))?;
        Ok(total)
    }

    /// Resolve the assets this processing request should chunk: a single
    /// asset when `file_id` is given, otherwise every `FILE` asset of the
    /// project.
    async fn resolve_assets(&self, project_id: i64, file_id: Option<i64>) -> Result<Vec<Asset>> {
        match file_id {
            Some(id) => {
                let asset = self
                    .services
                    .assets
                    .get_asset_by_id(project_id, id)
                    .await?
                    .ok_or_else(|| Error::not_found(format!("asset {id}")))?;
                Ok(vec![asset])
            }
            None => self.services.assets.list_assets(project_id, AssetType::File).await,
        }
    }

    /// Run the per-request processing pipeline (§4.3):
    /// resolve project → resolve assets → optional reset → chunk each asset
    /// → batched chunk persistence → report counts.
    ///
    /// Failure of any file aborts the batch; chunks already committed for
    /// prior files in the same batch remain (§4.3).
    pub async fn process(
        &self,
        project_id: i64,
        file_id: Option<i64>,
        chunk_size: usize,
        overlap_size: usize,
        do_reset: bool,
    ) -> Result<ProcessOutcome> {
        self.services.projects.get_or_create_project(project_id).await?;
        let assets = self.resolve_assets(project_id, file_id).await?;
        if assets.is_empty() {
            return Err(Error::validation("project has no files to process"));
        }

        if do_reset {
            let collection = ragcore_domain::constants::collection_name(project_id);
            self.services.vector_store.delete_collection(&collection).await?;
            self.services.chunks.delete_chunks_by_project(project_id).await?;
        }

        let options = ChunkingOptions::new(chunk_size, overlap_size)?;
        let dir = self.project_files_dir(project_id);

        let mut outcome = ProcessOutcome::default();
        for asset in assets {
            let asset_id = asset
                .id
                .ok_or_else(|| Error::internal("persisted asset missing id"))?;
            let content = tokio::fs::read_to_string(dir.join(&asset.asset_name))
                .await
                .map_err(|e| Error::io_with_source("failed to read asset file", e))?;

            let fragments = chunk_text(&content, options);
            let chunks: Vec<DataChunk> = fragments
                .into_iter()
                .map(|f| DataChunk::new(project_id, asset_id, f.text, f.order))
                .collect();

            let persisted = self
                .services
                .chunks
                .insert_many_chunks(&chunks, ragcore_domain::constants::DEFAULT_CHUNK_BATCH_SIZE)
                .await?;

            outcome.files_processed += 1;
            outcome.records_created += persisted.len();
        }

        outcome.signal = Some(Signal::FileProcessingCompleted);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template_catalog::TemplateCatalog;
    use async_trait::async_trait;
    use ragcore_domain::ports::*;
    use ragcore_domain::value_objects::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct FakeProjects;
    #[async_trait]
    impl ProjectRepository for FakeProjects {
        async fn get_or_create_project(&self, id: i64) -> Result<Project> {
            Ok(Project::new(id))
        }
        async fn get_project_by_id(&self, id: i64) -> Result<Option<Project>> {
            Ok(Some(Project::new(id)))
        }
    }

    #[derive(Default)]
    struct FakeAssets {
        rows: Mutex<Vec<Asset>>,
    }
    #[async_trait]
    impl AssetRepository for FakeAssets {
        async fn create_asset(&self, asset: &Asset) -> Result<Asset> {
            let mut rows = self.rows.lock().unwrap();
            let mut created = asset.clone();
            created.id = Some(rows.len() as i64 + 1);
            rows.push(created.clone());
            Ok(created)
        }
        async fn get_asset_by_name(&self, project_id: i64, asset_name: &str) -> Result<Option<Asset>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|a| a.project_id == project_id && a.asset_name == asset_name)
                .cloned())
        }
        async fn get_asset_by_id(&self, project_id: i64, asset_id: i64) -> Result<Option<Asset>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|a| a.project_id == project_id && a.id == Some(asset_id))
                .cloned())
        }
        async fn list_assets(&self, project_id: i64, _asset_type: AssetType) -> Result<Vec<Asset>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|a| a.project_id == project_id)
                .cloned()
                .collect())
        }
    }

    #[derive(Default)]
    struct FakeChunks {
        rows: Mutex<Vec<DataChunk>>,
    }
    #[async_trait]
    impl ChunkRepository for FakeChunks {
        async fn create_chunk(&self, chunk: &DataChunk) -> Result<DataChunk> {
            let mut rows = self.rows.lock().unwrap();
            let mut created = chunk.clone();
            created.id = Some(rows.len() as i64 + 1);
            rows.push(created.clone());
            Ok(created)
        }
        async fn insert_many_chunks(&self, chunks: &[DataChunk], _batch_size: usize) -> Result<Vec<DataChunk>> {
            let mut out = Vec::new();
            for chunk in chunks {
                out.push(self.create_chunk(chunk).await?);
            }
            Ok(out)
        }
        async fn delete_chunks_by_project(&self, project_id: i64) -> Result<u64> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|c| c.project_id != project_id);
            Ok((before - rows.len()) as u64)
        }
        async fn list_chunks(&self, project_id: i64, _page_no: u32, _page_size: u32) -> Result<Vec<DataChunk>> {
            Ok(self.rows.lock().unwrap().iter().filter(|c| c.project_id == project_id).cloned().collect())
        }
        async fn count_chunks(&self, project_id: i64) -> Result<u64> {
            Ok(self.rows.lock().unwrap().iter().filter(|c| c.project_id == project_id).count() as u64)
        }
    }

    struct FakeVectorStore;
    #[async_trait]
    impl VectorStoreProvider for FakeVectorStore {
        async fn connect(&self) -> Result<()> {
            Ok(())
        }
        async fn create_collection(&self, _name: &str, _dimension: usize, _reset: bool) -> Result<()> {
            Ok(())
        }
        async fn delete_collection(&self, _name: &str) -> Result<()> {
            Ok(())
        }
        async fn collection_info(&self, _name: &str) -> Result<Option<CollectionInfo>> {
            Ok(None)
        }
        async fn list_collections(&self) -> Result<Vec<String>> {
            Ok(Vec::new())
        }
        async fn insert_many(
            &self,
            _collection: &str,
            _texts: &[String],
            _vectors: &[Vec<f32>],
            _metadatas: Option<Vec<HashMap<String, serde_json::Value>>>,
            _chunk_ids: &[i64],
            _batch_size: usize,
            _language: Language,
        ) -> Result<()> {
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
            "fake"
        }
    }

    struct FakeEmbedder;
    #[async_trait]
    impl EmbeddingProvider for FakeEmbedder {
        async fn embed_text(&self, _text: &str, _document_type: DocumentType) -> Result<Vec<f32>> {
            Ok(vec![0.0; 4])
        }
        async fn embed_batch(&self, texts: &[String], _document_type: DocumentType) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| vec![0.0; 4]).collect())
        }
        fn dimension(&self) -> usize {
            4
        }
        fn provider_name(&self) -> &str {
            "fake"
        }
    }

    struct FakeGenerator;
    #[async_trait]
    impl GenerationProvider for FakeGenerator {
        async fn generate_text(
            &self,
            _prompt: &str,
            _chat_history: &[ProviderMessage],
            _max_tokens: Option<u32>,
            _temperature: Option<f32>,
        ) -> Result<String> {
            Ok("answer".to_string())
        }
        fn provider_name(&self) -> &str {
            "fake"
        }
    }

    struct FakeEvaluator;
    #[async_trait]
    impl EvaluationProvider for FakeEvaluator {
        async fn evaluate(&self, dataset: &[EvaluationSample], _metrics: &[Metric]) -> Result<Vec<MetricRow>> {
            Ok(dataset.iter().map(|_| HashMap::new()).collect())
        }
        fn provider_name(&self) -> &str {
            "fake"
        }
    }

    fn test_services(files_dir: std::path::PathBuf) -> Services {
        Services {
            projects: std::sync::Arc::new(FakeProjects),
            assets: std::sync::Arc::new(FakeAssets::default()),
            chunks: std::sync::Arc::new(FakeChunks::default()),
            vector_store: std::sync::Arc::new(FakeVectorStore),
            embedder: std::sync::Arc::new(FakeEmbedder),
            generator: std::sync::Arc::new(FakeGenerator),
            evaluator: std::sync::Arc::new(FakeEvaluator),
            templates: std::sync::Arc::new(TemplateCatalog::built_in(Language::English)),
            ingestion: std::sync::Arc::new(crate::services::IngestionSettings {
                allowed_mime_types: vec!["text/plain".to_string()],
                max_file_size_mb: 1,
                stream_chunk_size_kb: 64,
                default_chunk_size: 1000,
                files_dir,
            }),
            nlp: std::sync::Arc::new(crate::services::NlpSettings {
                default_top_k: 10,
                default_rrf_k: 60,
                default_max_tokens: 1024,
                default_temperature: 0.7,
                index_threshold: 100,
                primary_language: Language::English,
            }),
        }
    }

    #[test]
    fn validate_rejects_unsupported_mime() {
        let dir = tempfile::tempdir().unwrap();
        let controller = IngestionController::new(test_services(dir.path().to_path_buf()));
        assert_eq!(controller.validate_file("image/png", 10), Signal::FileTypeNotSupported);
    }

    #[test]
    fn validate_boundary_exact_max_size_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let controller = IngestionController::new(test_services(dir.path().to_path_buf()));
        let max_bytes = 1 * 1024 * 1024;
        assert_eq!(
            controller.validate_file("text/plain", max_bytes),
            Signal::FileValidateSuccessfully
        );
        assert_eq!(
            controller.validate_file("text/plain", max_bytes + 1),
            Signal::FileSizeExceeded
        );
    }

    #[tokio::test]
    async fn upload_happy_path_creates_asset_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let controller = IngestionController::new(test_services(dir.path().to_path_buf()));
        let payload = vec![b'x'; 10 * 1024];
        let outcome = controller
            .upload_file(1, "notes.txt", "text/plain", payload.len() as u64, payload.as_slice())
            .await
            .unwrap();
        assert_eq!(outcome.signal, Signal::FileUploadSuccess);
        let asset = outcome.asset.unwrap();
        assert_eq!(asset.asset_size, 10 * 1024);
        assert!(dir.path().join("1").join(&asset.asset_name).exists());
    }

    #[tokio::test]
    async fn upload_rejection_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let controller = IngestionController::new(test_services(dir.path().to_path_buf()));
        let payload = vec![b'x'; 2 * 1024 * 1024];
        let outcome = controller
            .upload_file(1, "big.txt", "text/plain", payload.len() as u64, payload.as_slice())
            .await
            .unwrap();
        assert_eq!(outcome.signal, Signal::FileSizeExceeded);
        assert!(outcome.asset.is_none());
        assert!(!dir.path().join("1").exists());
    }

    #[tokio::test]
    async fn process_chunks_each_asset_and_reports_counts() {
        let dir = tempfile::tempdir().unwrap();
        let controller = IngestionController::new(test_services(dir.path().to_path_buf()));

        for (name, size) in [("a.txt", 500usize), ("b.txt", 1500), ("c.txt", 2500)] {
            let payload = "a".repeat(size);
            controller
                .upload_file(1, name, "text/plain", payload.len() as u64, payload.as_bytes())
                .await
                .unwrap();
        }

        let outcome = controller.process(1, None, 1000, 200, true).await.unwrap();
        assert_eq!(outcome.files_processed, 3);
        assert_eq!(outcome.records_created, 6);
        assert_eq!(outcome.signal, Some(Signal::FileProcessingCompleted));
    }

    #[tokio::test]
    async fn process_with_no_assets_is_a_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let controller = IngestionController::new(test_services(dir.path().to_path_buf()));
        let err = controller.process(1, None, 1000, 200, false).await.unwrap_err();
        assert!(err.is_validation());
    }
}
