//! NLP controller (§4.4): vector indexing, hybrid search, answer generation.

use crate::services::Services;
use ragcore_domain::constants::{collection_name, DEFAULT_CHUNK_PAGE_SIZE};
use ragcore_domain::error::{Error, Result};
use ragcore_domain::ports::{DocumentType, MessageRole};
use ragcore_domain::signal::Signal;
use ragcore_domain::value_objects::{DataChunk, Language, RetrievedDocument};

/// Outcome of [`NlpController::push`].
#[derive(Debug, Clone, Default)]
pub struct PushOutcome {
    /// The outcome signal.
    pub signal: Option<Signal>,
    /// Number of pages processed.
    pub pages_indexed: usize,
    /// Total number of chunks inserted into the vector store. Counted
    /// exactly once per chunk.
    pub inserted_count: usize,
}

/// Outcome of [`NlpController::answer`].
#[derive(Debug, Clone)]
pub struct AnswerOutcome {
    /// The outcome signal.
    pub signal: Signal,
    /// The generated answer text, empty on failure.
    pub answer: String,
    /// The fully assembled prompt sent to the generation provider.
    pub full_prompt: String,
    /// The chat history accompanying the prompt.
    pub chat_history: Vec<ragcore_domain::ports::ProviderMessage>,
    /// The documents retrieved for this query.
    pub retrieved: Vec<RetrievedDocument>,
}

/// Orchestrates collection lifecycle, vector indexing, hybrid retrieval and
/// answer generation.
pub struct NlpController {
    services: Services,
}

impl NlpController {
    #[must_use]
    pub fn new(services: Services) -> Self {
        Self { services }
    }

    /// The collection name for `project_id` — a pure function (§4.4), never
    /// derived from any mutable state.
    #[must_use]
    pub fn collection_name(&self, project_id: i64) -> String {
        collection_name(project_id)
    }

    async fn ensure_collection(&self, project_id: i64, reset: bool) -> Result<String> {
        let collection = self.collection_name(project_id);
        self.services
            .vector_store
            .create_collection(&collection, self.services.embedder.dimension(), reset)
            .await?;
        Ok(collection)
    }

    async fn index_chunks(&self, collection: &str, chunks: &[DataChunk]) -> Result<usize> {
        if chunks.is_empty() {
            return Ok(0);
        }
        let texts: Vec<String> = chunks.iter().map(|c| c.chunk_text.clone()).collect();
        let vectors = self
            .services
            .embedder
            .embed_batch(&texts, DocumentType::Document)
            .await?;
        let chunk_ids: Vec<i64> = chunks
            .iter()
            .map(|c| c.id.ok_or_else(|| Error::internal("chunk missing id before indexing")))
            .collect::<Result<_>>()?;

        self.services
            .vector_store
            .insert_many(
                collection,
                &texts,
                &vectors,
                None,
                &chunk_ids,
                ragcore_domain::constants::DEFAULT_CHUNK_BATCH_SIZE,
                self.services.nlp.primary_language,
            )
            .await?;

        self.services.vector_store.maybe_create_indexes(collection).await?;
        Ok(chunks.len())
    }

    /// Push all of a project's persisted chunks into its vector collection,
    /// paginated at [`DEFAULT_CHUNK_PAGE_SIZE`] rows per page (§4.4). Each
    /// chunk is counted exactly once toward `inserted_count`, regardless of
    /// how many pages it took to reach it.
    pub async fn push(&self, project_id: i64, reset: bool) -> Result<PushOutcome> {
        let collection = self.ensure_collection(project_id, reset).await?;

        let mut outcome = PushOutcome::default();
        let mut page_no = 1u32;

        loop {
            let page = self
                .services
                .chunks
                .list_chunks(project_id, page_no, DEFAULT_CHUNK_PAGE_SIZE)
                .await?;
            if page.is_empty() {
                break;
            }

            let indexed = self.index_chunks(&collection, &page).await?;
            outcome.inserted_count += indexed;
            outcome.pages_indexed += 1;

            if page.len() < DEFAULT_CHUNK_PAGE_SIZE as usize {
                break;
            }
            page_no += 1;
        }

        outcome.signal = Some(Signal::IndexingCompleted);
        Ok(outcome)
    }

    /// Hybrid search over a project's collection (§4.4, §4.1).
    ///
    /// `top_k = 0` returns an empty result immediately, without calling the
    /// embedding or vector store provider (§8 boundary behaviors).
    pub async fn search(
        &self,
        project_id: i64,
        query_text: &str,
        top_k: Option<usize>,
        rrf_k: Option<u32>,
    ) -> Result<Vec<RetrievedDocument>> {
        let top_k = top_k.unwrap_or(self.services.nlp.default_top_k);
        if top_k == 0 {
            return Ok(Vec::new());
        }

        let collection = self.collection_name(project_id);
        let query_vector = self
            .services
            .embedder
            .embed_text(query_text, DocumentType::Query)
            .await?;

        self.services
            .vector_store
            .search(&collection, query_text, &query_vector, top_k, rrf_k.unwrap_or(self.services.nlp.default_rrf_k))
            .await
    }

    fn assemble_prompt(&self, query: &str, documents: &[RetrievedDocument], language: Language) -> Result<String> {
        let templates = &self.services.templates;
        let mut prompt = templates.system_prompt(language);
        for (i, doc) in documents.iter().enumerate() {
            prompt.push('\n');
            prompt.push_str(&templates.document_fragment(language, i + 1, &doc.text)?);
        }
        prompt.push('\n');
        prompt.push_str(&templates.footer(language, query)?);
        Ok(prompt)
    }

    /// Retrieve, optionally re-rank, assemble a prompt and generate an
    /// answer (§4.4, end-to-end RAG flow).
    pub async fn answer(
        &self,
        project_id: i64,
        query: &str,
        top_k: Option<usize>,
        use_reranking: bool,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
    ) -> Result<AnswerOutcome> {
        let language = self.services.nlp.primary_language;
        let mut retrieved = match self.search(project_id, query, top_k, None).await {
            Ok(docs) => docs,
            Err(_) => {
                return Ok(AnswerOutcome {
                    signal: Signal::SearchFailed,
                    answer: String::new(),
                    full_prompt: String::new(),
                    chat_history: Vec::new(),
                    retrieved: Vec::new(),
                })
            }
        };

        if use_reranking && !retrieved.is_empty() {
            let texts: Vec<String> = retrieved.iter().map(|d| d.text.clone()).collect();
            let order = self.services.generator.rerank(query, &texts, retrieved.len()).await;
            retrieved = order.into_iter().filter_map(|i| retrieved.get(i).cloned()).collect();
        }

        let prompt = match self.assemble_prompt(query, &retrieved, language) {
            Ok(p) => p,
            Err(_) => {
                return Ok(AnswerOutcome {
                    signal: Signal::AnswerGenerationFailed,
                    answer: String::new(),
                    full_prompt: String::new(),
                    chat_history: Vec::new(),
                    retrieved,
                })
            }
        };
        let chat_history = vec![self
            .services
            .generator
            .construct_prompt(query, MessageRole::User)];

        let generated = self
            .services
            .generator
            .generate_text(
                &prompt,
                &chat_history,
                max_tokens.or(Some(self.services.nlp.default_max_tokens)),
                temperature.or(Some(self.services.nlp.default_temperature)),
            )
            .await;

        match generated {
            Ok(answer) => Ok(AnswerOutcome {
                signal: Signal::AnswerGenerationCompleted,
                answer,
                full_prompt: prompt,
                chat_history,
                retrieved,
            }),
            Err(_) => Ok(AnswerOutcome {
                signal: Signal::AnswerGenerationFailed,
                answer: String::new(),
                full_prompt: prompt,
                chat_history,
                retrieved,
            }),
        }
    }
}
