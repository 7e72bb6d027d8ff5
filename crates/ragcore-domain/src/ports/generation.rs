//! Generation LLM provider port (§4.5).

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Role of a message in a chat-style prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    /// System instruction.
    System,
    /// User turn.
    User,
    /// Model turn.
    Assistant,
}

/// A provider-native chat message, as returned by `construct_prompt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderMessage {
    /// The message's role.
    pub role: MessageRole,
    /// The message's text content.
    pub text: String,
}

/// A pluggable generation LLM.
///
/// Implementations are expected to be stateless beyond their configured
/// model id and generation defaults (§5, "Shared resources"): one client is
/// constructed per provider type and shared across requests.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generate text for `prompt`, optionally continuing `chat_history`.
    ///
    /// `max_tokens`/`temperature` override the provider's configured
    /// defaults when present. Returns an empty string, never an error, when
    /// the underlying model responds with no text (§4.4).
    async fn generate_text(
        &self,
        prompt: &str,
        chat_history: &[ProviderMessage],
        max_tokens: Option<u32>,
        temperature: Option<f32>,
    ) -> Result<String>;

    /// Re-rank `docs` (already-retrieved text) against `query`, returning at
    /// most `top_n` indices into `docs` in descending relevance order.
    ///
    /// The default implementation prompts the model with an enumeration of
    /// `ID: <i> | Content: <truncated>` lines and asks for a JSON array of
    /// ids, per §4.4. Any failure (non-JSON response, parse error, empty
    /// result, generation error) is recovered locally by falling back to
    /// the input order truncated to `top_n` — this method never errors.
    async fn rerank(&self, query: &str, docs: &[String], top_n: usize) -> Vec<usize> {
        default_rerank(self, query, docs, top_n).await
    }

    /// Wrap `text` as a provider-native message with the given role.
    fn construct_prompt(&self, text: &str, role: MessageRole) -> ProviderMessage {
        ProviderMessage {
            role,
            text: text.to_string(),
        }
    }

    /// A short identifier for logging/metrics (e.g. `"gemini"`).
    fn provider_name(&self) -> &str;
}

/// Maximum characters of a candidate document shown to the reranking prompt.
const RERANK_CONTENT_PREVIEW_CHARS: usize = 500;

/// Shared implementation of [`GenerationProvider::rerank`], factored out so
/// providers get the same fallback-on-any-failure behavior for free.
async fn default_rerank<P: GenerationProvider + ?Sized>(
    provider: &P,
    query: &str,
    docs: &[String],
    top_n: usize,
) -> Vec<usize> {
    let fallback = || (0..docs.len().min(top_n)).collect::<Vec<_>>();
    if docs.is_empty() {
        return Vec::new();
    }

    let enumeration: String = docs
        .iter()
        .enumerate()
        .map(|(i, doc)| {
            let preview: String = doc.chars().take(RERANK_CONTENT_PREVIEW_CHARS).collect();
            format!("ID: {i} | Content: {preview}")
        })
        .collect::<Vec<_>>()
        .join("\n");

    let prompt = format!(
        "You are an expert search evaluator. Rank the following documents by \
         relevance to the query.\n\nQuery: {query}\n\nDocuments:\n{enumeration}\n\n\
         Output only a JSON array of IDs in order of relevance, most relevant \
         first. Return only the top {top_n} IDs."
    );

    let response = match provider.generate_text(&prompt, &[], None, None).await {
        Ok(text) if !text.trim().is_empty() => text,
        _ => return fallback(),
    };

    let cleaned = response
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    let Ok(indices) = serde_json::from_str::<Vec<usize>>(cleaned) else {
        return fallback();
    };

    let ordered: Vec<usize> = indices
        .into_iter()
        .filter(|&i| i < docs.len())
        .take(top_n)
        .collect();

    if ordered.is_empty() {
        fallback()
    } else {
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubProvider {
        response: String,
    }

    #[async_trait]
    impl GenerationProvider for StubProvider {
        async fn generate_text(
            &self,
            _prompt: &str,
            _chat_history: &[ProviderMessage],
            _max_tokens: Option<u32>,
            _temperature: Option<f32>,
        ) -> Result<String> {
            Ok(self.response.clone())
        }

        fn provider_name(&self) -> &str {
            "stub"
        }
    }

    #[tokio::test]
    async fn rerank_falls_back_on_non_json_response() {
        let provider = StubProvider {
            response: "not json".to_string(),
        };
        let docs = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let order = provider.rerank("q", &docs, 2).await;
        assert_eq!(order, vec![0, 1]);
    }

    #[tokio::test]
    async fn rerank_parses_code_fenced_json() {
        let provider = StubProvider {
            response: "```json\n[2, 0, 1]\n```".to_string(),
        };
        let docs = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let order = provider.rerank("q", &docs, 3).await;
        assert_eq!(order, vec![2, 0, 1]);
    }

    #[tokio::test]
    async fn rerank_filters_out_of_range_indices() {
        let provider = StubProvider {
            response: "[5, 1, 0]".to_string(),
        };
        let docs = vec!["a".to_string(), "b".to_string()];
        let order = provider.rerank("q", &docs, 5).await;
        assert_eq!(order, vec![1, 0]);
    }

    #[tokio::test]
    async fn rerank_on_empty_docs_returns_empty() {
        let provider = StubProvider {
            response: "[]".to_string(),
        };
        let order = provider.rerank("q", &[], 5).await;
        assert!(order.is_empty());
    }
}
