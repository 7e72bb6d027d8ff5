//! Evaluation controller (§4.7, supplemented per §12).
//!
//! Runs a batch of test questions through the same search + answer path a
//! live request would take, then hands the resulting
//! `(question, answer, contexts, ground_truth)` rows to the configured
//! evaluation provider.

use crate::controllers::nlp::NlpController;
use crate::services::Services;
use ragcore_domain::error::Result;
use ragcore_domain::ports::{EvaluationSample, Metric, MetricRow};

/// One test case: a question and its optional reference answer. Unlike the
/// original's hardcoded placeholder, `ground_truth` is supplied by the
/// caller — the provider simply omits ground-truth-dependent metrics when
/// it is absent.
#[derive(Debug, Clone)]
pub struct EvaluationCase {
    /// The question to ask.
    pub question: String,
    /// Reference answer, if known.
    pub ground_truth: Option<String>,
}

/// Runs evaluation batches end to end.
pub struct EvaluationController {
    services: Services,
}

impl EvaluationController {
    #[must_use]
    pub fn new(services: Services) -> Self {
        Self { services }
    }

    /// Answer every case in `cases` via the same retrieval+generation path
    /// as a live request, then evaluate the resulting dataset against
    /// `metrics`.
    pub async fn run(
        &self,
        project_id: i64,
        cases: &[EvaluationCase],
        metrics: &[Metric],
    ) -> Result<Vec<MetricRow>> {
        let nlp = NlpController::new(self.services.clone());
        let mut dataset = Vec::with_capacity(cases.len());

        for case in cases {
            let outcome = nlp
                .answer(project_id, &case.question, None, false, None, None)
                .await?;

            dataset.push(EvaluationSample {
                question: case.question.clone(),
                answer: outcome.answer,
                contexts: outcome.retrieved.into_iter().map(|d| d.text).collect(),
                ground_truth: case.ground_truth.clone(),
            });
        }

        self.services.evaluator.evaluate(&dataset, metrics).await
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
    use std::sync::Arc;

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

    struct FakeAssets;
    #[async_trait]
    impl AssetRepository for FakeAssets {
        async fn create_asset(&self, asset: &Asset) -> Result<Asset> {
            Ok(asset.clone())
        }
        async fn get_asset_by_name(&self, _p: i64, _n: &str) -> Result<Option<Asset>> {
            Ok(None)
        }
        async fn get_asset_by_id(&self, _p: i64, _id: i64) -> Result<Option<Asset>> {
            Ok(None)
        }
        async fn list_assets(&self, _p: i64, _t: AssetType) -> Result<Vec<Asset>> {
            Ok(Vec::new())
        }
    }

    struct FakeChunks;
    #[async_trait]
    impl ChunkRepository for FakeChunks {
        async fn create_chunk(&self, chunk: &DataChunk) -> Result<DataChunk> {
            Ok(chunk.clone())
        }
        async fn insert_many_chunks(&self, chunks: &[DataChunk], _b: usize) -> Result<Vec<DataChunk>> {
            Ok(chunks.to_vec())
        }
        async fn delete_chunks_by_project(&self, _p: i64) -> Result<u64> {
            Ok(0)
        }
        async fn list_chunks(&self, _p: i64, _page_no: u32, _page_size: u32) -> Result<Vec<DataChunk>> {
            Ok(Vec::new())
        }
        async fn count_chunks(&self, _p: i64) -> Result<u64> {
            Ok(0)
        }
    }

    struct FakeVectorStore;
    #[async_trait]
    impl VectorStoreProvider for FakeVectorStore {
        async fn connect(&self) -> Result<()> {
            Ok(())
        }
        async fn create_collection(&self, _n: &str, _d: usize, _r: bool) -> Result<()> {
            Ok(())
        }
        async fn delete_collection(&self, _n: &str) -> Result<()> {
            Ok(())
        }
        async fn collection_info(&self, _n: &str) -> Result<Option<CollectionInfo>> {
            Ok(None)
        }
        async fn list_collections(&self) -> Result<Vec<String>> {
            Ok(Vec::new())
        }
        async fn insert_many(
            &self,
            _c: &str,
            _t: &[String],
            _v: &[Vec<f32>],
            _m: Option<Vec<HashMap<String, serde_json::Value>>>,
            _ids: &[i64],
            _b: usize,
            _l: Language,
        ) -> Result<()> {
            Ok(())
        }
        async fn search(
            &self,
            _c: &str,
            _qt: &str,
            _qv: &[f32],
            _top_k: usize,
            _rrf_k: u32,
        ) -> Result<Vec<RetrievedDocument>> {
            Ok(vec![RetrievedDocument::new("context one", 0.9)])
        }
        async fn maybe_create_indexes(&self, _c: &str) -> Result<()> {
            Ok(())
        }
        async fn reset_indexes(&self, _c: &str) -> Result<()> {
            Ok(())
        }
        fn provider_name(&self) -> &str {
            "fake"
        }
    }

    struct FakeEmbedder;
    #[async_trait]
    impl EmbeddingProvider for FakeEmbedder {
        async fn embed_text(&self, _t: &str, _d: DocumentType) -> Result<Vec<f32>> {
            Ok(vec![0.0; 4])
        }
        async fn embed_batch(&self, texts: &[String], _d: DocumentType) -> Result<Vec<Vec<f32>>> {
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
            _p: &str,
            _h: &[ProviderMessage],
            _mt: Option<u32>,
            _t: Option<f32>,
        ) -> Result<String> {
            Ok("generated answer".to_string())
        }
        fn provider_name(&self) -> &str {
            "fake"
        }
    }

    struct FakeEvaluator;
    #[async_trait]
    impl EvaluationProvider for FakeEvaluator {
        async fn evaluate(&self, dataset: &[EvaluationSample], metrics: &[Metric]) -> Result<Vec<MetricRow>> {
            Ok(dataset
                .iter()
                .map(|sample| {
                    let mut row = HashMap::new();
                    row.insert("question".to_string(), serde_json::json!(sample.question));
                    for metric in metrics {
                        row.insert(metric.name.clone(), serde_json::json!(1.0));
                    }
                    row
                })
                .collect())
        }
        fn provider_name(&self) -> &str {
            "fake"
        }
    }

    fn test_services() -> Services {
        Services {
            projects: Arc::new(FakeProjects),
            assets: Arc::new(FakeAssets),
            chunks: Arc::new(FakeChunks),
            vector_store: Arc::new(FakeVectorStore),
            embedder: Arc::new(FakeEmbedder),
            generator: Arc::new(FakeGenerator),
            evaluator: Arc::new(FakeEvaluator),
            templates: Arc::new(TemplateCatalog::built_in(Language::English)),
            ingestion: Arc::new(crate::services::IngestionSettings {
                allowed_mime_types: vec!["text/plain".to_string()],
                max_file_size_mb: 1,
                stream_chunk_size_kb: 64,
                default_chunk_size: 1000,
                files_dir: std::env::temp_dir(),
            }),
            nlp: Arc::new(crate::services::NlpSettings {
                default_top_k: 10,
                default_rrf_k: 60,
                default_max_tokens: 1024,
                default_temperature: 0.7,
                index_threshold: 100,
                primary_language: Language::English,
            }),
        }
    }

    #[tokio::test]
    async fn run_produces_one_row_per_case() {
        let controller = EvaluationController::new(test_services());
        let cases = vec![
            EvaluationCase { question: "what is RAG?".to_string(), ground_truth: None },
            EvaluationCase {
                question: "how does chunking work?".to_string(),
                ground_truth: Some("overlapping windows".to_string()),
            },
        ];
        let metrics = vec![Metric { name: "faithfulness".to_string() }];
        let rows = controller.run(1, &cases, &metrics).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].contains_key("faithfulness"));
    }

    #[tokio::test]
    async fn run_on_empty_batch_returns_empty() {
        let controller = EvaluationController::new(test_services());
        let rows = controller.run(1, &[], &[]).await.unwrap();
        assert!(rows.is_empty());
    }
}
