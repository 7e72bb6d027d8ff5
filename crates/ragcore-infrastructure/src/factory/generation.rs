//! Generation (LLM) provider factory.

use super::gemini_providers;
use crate::config::GenerationConfig;
use ragcore_domain::error::{Error, Result};
use ragcore_domain::ports::GenerationProvider;
use ragcore_providers::{GeminiGenerationProvider, NullGenerationProvider};
use std::sync::Arc;

/// Builds a [`GenerationProvider`] from [`GenerationConfig::backend`].
pub struct GenerationProviderFactory;

impl GenerationProviderFactory {
    /// Construct the configured provider, passing `api_key` through for
    /// providers that need one.
    pub fn create(config: &GenerationConfig, api_key: &str) -> Result<Arc<dyn GenerationProvider>> {
        match config.backend.to_lowercase().as_str() {
            gemini_providers::GEMINI => {
                let system_instructions = if config.system_instructions.trim().is_empty() {
                    None
                } else {
                    Some(config.system_instructions.clone())
                };
                let provider = GeminiGenerationProvider::new(
                    api_key.to_string(),
                    config.model_id.clone(),
                    system_instructions,
                    config.default_max_tokens,
                    config.default_temperature,
                    config.default_input_max_characters,
                )?;
                Ok(Arc::new(provider))
            }
            gemini_providers::NULL => Ok(Arc::new(NullGenerationProvider)),
            other => Err(Error::config(format!("unknown generation backend '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(backend: &str) -> GenerationConfig {
        GenerationConfig {
            backend: backend.to_string(),
            model_id: "gemini-1.5-flash".to_string(),
            default_max_tokens: 1024,
            default_temperature: 0.7,
            default_input_max_characters: 8000,
            system_instructions: "Answer from context only.".to_string(),
        }
    }

    #[test]
    fn creates_null_provider() {
        let provider = GenerationProviderFactory::create(&config("NULL"), "").unwrap();
        assert_eq!(provider.provider_name(), "null");
    }

    #[test]
    fn creates_gemini_provider() {
        let provider = GenerationProviderFactory::create(&config("GEMINI"), "key").unwrap();
        assert_eq!(provider.provider_name(), "gemini");
    }

    #[test]
    fn rejects_unknown_backend() {
        assert!(GenerationProviderFactory::create(&config("bogus"), "key").is_err());
    }
}
