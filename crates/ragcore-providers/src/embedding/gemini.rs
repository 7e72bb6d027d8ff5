//! Gemini embedding provider: document and query embedding over the
//! Gemini REST API (§4.5).

use async_trait::async_trait;
use ragcore_domain::error::{Error, Result};
use ragcore_domain::ports::{DocumentType, EmbeddingProvider};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

fn task_type(document_type: DocumentType) -> &'static str {
    match document_type {
        DocumentType::Document => "RETRIEVAL_DOCUMENT",
        DocumentType::Query => "RETRIEVAL_QUERY",
    }
}

/// Calls the Gemini `embedContent` / `batchEmbedContents` REST endpoints.
///
/// `dimension` is fixed at construction: the provider is wired to one model
/// id for its lifetime, and the vector store sizes collections from it.
pub struct GeminiEmbeddingProvider {
    api_key: String,
    model: String,
    dimension: usize,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiEmbeddingProvider {
    /// Build a provider for `model` (e.g. `"text-embedding-004"`), producing
    /// `dimension`-wide vectors.
    pub fn new(api_key: String, model: String, dimension: usize) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::provider(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            api_key,
            model,
            dimension,
            base_url: DEFAULT_BASE_URL.to_string(),
            client,
        })
    }

    fn api_model_name(&self) -> &str {
        self.model.strip_prefix("models/").unwrap_or(&self.model)
    }

    fn parse_values(value: &serde_json::Value) -> Result<Vec<f32>> {
        value["values"]
            .as_array()
            .ok_or_else(|| Error::provider("Gemini embedding response missing 'values'"))?
            .iter()
            .map(|v| {
                v.as_f64()
                    .map(|f| f as f32)
                    .ok_or_else(|| Error::provider("Gemini embedding value was not a number"))
            })
            .collect()
    }
}

#[async_trait]
impl EmbeddingProvider for GeminiEmbeddingProvider {
    async fn embed_text(&self, text: &str, document_type: DocumentType) -> Result<Vec<f32>> {
        let url = format!(
            "{}/v1beta/models/{}:embedContent?key={}",
            self.base_url,
            self.api_model_name(),
            self.api_key
        );
        let payload = serde_json::json!({
            "content": { "parts": [{ "text": text }] },
            "taskType": task_type(document_type),
        });

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::provider(format!("Gemini embedding request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::provider(format!("Gemini embedding API error {status}: {body}")));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| Error::provider(format!("failed to parse Gemini embedding response: {e}")))?;

        Self::parse_values(&body["embedding"])
    }

    async fn embed_batch(&self, texts: &[String], document_type: DocumentType) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!(
            "{}/v1beta/models/{}:batchEmbedContents?key={}",
            self.base_url,
            self.api_model_name(),
            self.api_key
        );
        let model_path = format!("models/{}", self.api_model_name());
        let requests: Vec<_> = texts
            .iter()
            .map(|text| {
                serde_json::json!({
                    "model": model_path,
                    "content": { "parts": [{ "text": text }] },
                    "taskType": task_type(document_type),
                })
            })
            .collect();

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "requests": requests }))
            .send()
            .await
            .map_err(|e| Error::provider(format!("Gemini batch embedding request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::provider(format!(
                "Gemini batch embedding API error {status}: {body}"
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| Error::provider(format!("failed to parse Gemini batch embedding response: {e}")))?;

        body["embeddings"]
            .as_array()
            .ok_or_else(|| Error::provider("Gemini batch embedding response missing 'embeddings'"))?
            .iter()
            .map(Self::parse_values)
            .collect()
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_model_name_strips_models_prefix() {
        let provider = GeminiEmbeddingProvider::new(
            "key".to_string(),
            "models/text-embedding-004".to_string(),
            768,
        )
        .unwrap();
        assert_eq!(provider.api_model_name(), "text-embedding-004");
    }

    #[test]
    fn task_type_maps_document_and_query() {
        assert_eq!(task_type(DocumentType::Document), "RETRIEVAL_DOCUMENT");
        assert_eq!(task_type(DocumentType::Query), "RETRIEVAL_QUERY");
    }

    #[test]
    fn parse_values_reads_numeric_array() {
        let value = serde_json::json!({ "values": [0.1, 0.2, 0.3] });
        let parsed = GeminiEmbeddingProvider::parse_values(&value).unwrap();
        assert_eq!(parsed, vec![0.1_f32, 0.2, 0.3]);
    }

    #[test]
    fn parse_values_rejects_missing_field() {
        let value = serde_json::json!({});
        assert!(GeminiEmbeddingProvider::parse_values(&value).is_err());
    }
}
