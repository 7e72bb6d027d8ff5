//! No-op generation provider, for local development and tests without a
//! real LLM backend (§11, `NULL` factory tag).

use async_trait::async_trait;
use ragcore_domain::error::Result;
use ragcore_domain::ports::{GenerationProvider, ProviderMessage};

/// Always returns an empty string, matching the "no text returned" case
/// `GenerationProvider::generate_text` documents for real providers.
pub struct NullGenerationProvider;

#[async_trait]
impl GenerationProvider for NullGenerationProvider {
    async fn generate_text(
        &self,
        _prompt: &str,
        _chat_history: &[ProviderMessage],
        _max_tokens: Option<u32>,
        _temperature: Option<f32>,
    ) -> Result<String> {
        Ok(String::new())
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn generate_text_is_always_empty() {
        let provider = NullGenerationProvider;
        let text = provider.generate_text("prompt", &[], None, None).await.unwrap();
        assert!(text.is_empty());
    }
}
