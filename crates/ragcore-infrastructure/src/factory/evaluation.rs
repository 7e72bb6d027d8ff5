//! Evaluation provider factory.
//!
//! No Rust port of RAGAS exists (§12); every known `RAGAS_PROVIDER` tag
//! resolves to [`NullEvaluationProvider`], labelled with the configured
//! backend so its warning log names what was asked for instead of masking
//! it.

use super::gemini_providers;
use ragcore_domain::error::{Error, Result};
use ragcore_domain::ports::EvaluationProvider;
use ragcore_providers::NullEvaluationProvider;
use std::sync::Arc;

/// Builds an [`EvaluationProvider`] from the `RAGAS_PROVIDER` tag.
pub struct EvaluationProviderFactory;

impl EvaluationProviderFactory {
    /// Construct the configured provider. `embedding_model_id` labels the
    /// embeddings half of the (currently null) RAGAS pairing.
    pub fn create(ragas_provider: &str, embedding_model_id: &str) -> Result<Arc<dyn EvaluationProvider>> {
        match ragas_provider.to_lowercase().as_str() {
            gemini_providers::GEMINI => Ok(Arc::new(NullEvaluationProvider::new(
                "gemini".to_string(),
                embedding_model_id.to_string(),
            ))),
            gemini_providers::NULL => Ok(Arc::new(NullEvaluationProvider::new(
                "null".to_string(),
                "null".to_string(),
            ))),
            other => Err(Error::config(format!("unknown evaluation backend '{other}'"))),
        }
    }
}
