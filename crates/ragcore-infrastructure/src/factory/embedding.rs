//! Embedding provider factory.

use super::gemini_providers;
use crate::config::EmbeddingConfig;
use ragcore_domain::error::{Error, Result};
use ragcore_domain::ports::EmbeddingProvider;
use ragcore_providers::{GeminiEmbeddingProvider, NullEmbeddingProvider};
use std::sync::Arc;

/// Builds an [`EmbeddingProvider`] from [`EmbeddingConfig::backend`].
pub struct EmbeddingProviderFactory;

impl EmbeddingProviderFactory {
    /// Construct the configured provider, passing `api_key` through for
    /// providers that need one.
    pub fn create(config: &EmbeddingConfig, api_key: &str) -> Result<Arc<dyn EmbeddingProvider>> {
        match config.backend.to_lowercase().as_str() {
            gemini_providers::GEMINI => {
                let provider = GeminiEmbeddingProvider::new(
                    api_key.to_string(),
                    config.model_id.clone(),
                    config.model_size,
                )?;
                Ok(Arc::new(provider))
            }
            gemini_providers::NULL => Ok(Arc::new(NullEmbeddingProvider::new(config.model_size))),
            other => Err(Error::config(format!("unknown embedding backend '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(backend: &str) -> EmbeddingConfig {
        EmbeddingConfig {
            backend: backend.to_string(),
            model_id: "text-embedding-004".to_string(),
            model_size: 768,
        }
    }

    #[test]
    fn creates_null_provider() {
        let provider = EmbeddingProviderFactory::create(&config("NULL"), "").unwrap();
        assert_eq!(provider.provider_name(), "null");
        assert_eq!(provider.dimension(), 768);
    }

    #[test]
    fn creates_gemini_provider() {
        let provider = EmbeddingProviderFactory::create(&config("GEMINI"), "key").unwrap();
        assert_eq!(provider.provider_name(), "gemini");
    }

    #[test]
    fn rejects_unknown_backend() {
        assert!(EmbeddingProviderFactory::create(&config("bogus"), "key").is_err());
    }
}
