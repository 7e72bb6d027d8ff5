//! Request/response bodies for the HTTP surface (§6).
//!
//! Thin wire shapes only — every field is either copied from a controller
//! outcome or a bare request parameter; no behavior lives here.

use ragcore_domain::ports::ProviderMessage;
use ragcore_domain::signal::Signal;
use ragcore_domain::value_objects::{CollectionInfo, RetrievedDocument};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// `POST /upload/{project_id}` response.
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    /// The outcome signal.
    pub signal: Signal,
    /// The persisted asset id, present only on success.
    pub file_id: Option<i64>,
}

/// `POST /upload/process/{project_id}` request body.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessRequest {
    /// Process a single asset instead of every asset in the project.
    #[serde(default)]
    pub file_id: Option<i64>,
    /// Target chunk size, in characters.
    pub chunk_size: usize,
    /// Overlap between consecutive chunks, in characters.
    pub overlap_size: usize,
    /// Drop the project's existing collection and chunks first.
    #[serde(default)]
    pub do_reset: bool,
}

/// `POST /upload/process/{project_id}` response.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessResponse {
    /// The outcome signal.
    pub signal: Option<Signal>,
    /// Number of assets successfully chunked and persisted.
    pub files_processed: usize,
    /// Total chunk rows created across all processed assets.
    pub records_created: usize,
}

/// `POST /nlp/push/{project_id}` request body.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PushRequest {
    /// Drop and recreate the project's collection before indexing.
    #[serde(default)]
    pub do_reset: bool,
}

/// `POST /nlp/push/{project_id}` response.
#[derive(Debug, Clone, Serialize)]
pub struct PushResponse {
    /// The outcome signal.
    pub signal: Option<Signal>,
    /// Total chunks indexed across all pages.
    pub indexed_chunks: usize,
}

/// `GET /nlp/collection_info/{project_id}` response.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionInfoResponse {
    /// The outcome signal.
    pub signal: Signal,
    /// The collection's metadata, absent if it doesn't exist.
    pub collection_info: Option<CollectionInfo>,
}

/// `POST /nlp/search/{project_id}` request body.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    /// The query text.
    pub text: String,
    /// Number of documents to retrieve; defaults to the configured value.
    #[serde(default)]
    pub top_k: Option<usize>,
}

/// One retrieved document in a search response.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResultDto {
    /// The document's text.
    pub text: String,
    /// Fused relevance score; higher is better.
    pub score: f64,
}

impl From<RetrievedDocument> for SearchResultDto {
    fn from(doc: RetrievedDocument) -> Self {
        Self { text: doc.text, score: doc.score }
    }
}

/// `POST /nlp/search/{project_id}` response.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    /// The outcome signal.
    pub signal: Signal,
    /// The retrieved documents, in descending score order.
    pub results: Vec<SearchResultDto>,
}

/// `POST /nlp/answer/{project_id}` request body.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerRequest {
    /// The question to answer.
    pub text: String,
    /// Number of documents to retrieve; defaults to the configured value.
    #[serde(default)]
    pub top_k: Option<usize>,
    /// Rerank retrieved documents with the generation provider before
    /// prompting, defaulting to off.
    #[serde(default)]
    pub use_reranking: bool,
    /// Override the provider's default max output tokens.
    #[serde(default)]
    pub max_tokens: Option<u32>,
    /// Override the provider's default sampling temperature.
    #[serde(default)]
    pub temperature: Option<f32>,
}

/// `POST /nlp/answer/{project_id}` response.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerResponse {
    /// The outcome signal.
    pub signal: Signal,
    /// The generated answer text, empty on failure.
    pub answer: String,
    /// The fully assembled prompt sent to the generation provider.
    pub full_prompt: String,
    /// The chat history accompanying the prompt.
    pub chat_history: Vec<ProviderMessage>,
}

/// One test case in an evaluation batch.
#[derive(Debug, Clone, Deserialize)]
pub struct TestQueryDto {
    /// The question to ask.
    pub question: String,
    /// Reference answer, if the caller has one.
    #[serde(default)]
    pub ground_truth: Option<String>,
}

/// `POST /evaluation/{project_id}` request body.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationRequest {
    /// The test questions to run through retrieval + answer generation.
    pub test_queries: Vec<TestQueryDto>,
}

/// `POST /evaluation/{project_id}` response.
///
/// The closed [`Signal`] enum has no evaluation-specific variant (§6), so
/// this endpoint never attaches one: `signal` is always `None`, and failures
/// are reported purely through the HTTP status.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResponse {
    /// Always `None` (§6 note above); retained for wire-shape parity with
    /// the other endpoints.
    pub signal: Option<Signal>,
    /// Per-query metric rows, in request order.
    pub metrics: Vec<HashMap<String, Value>>,
}
