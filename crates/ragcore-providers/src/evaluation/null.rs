//! Null evaluation provider: a `llm`/`embeddings`/`get_metrics`-shaped seam
//! with no real RAGAS computation behind it (§4.5, §12).
//!
//! There is no Rust port of RAGAS; this provider defines the seam
//! (`llm_label`/`embeddings_label` stand in for the configured
//! `llm`/`embeddings` handles) and reports every requested metric as
//! unscored rather than silently fabricating a number.

use async_trait::async_trait;
use ragcore_domain::error::Result;
use ragcore_domain::ports::{EvaluationProvider, EvaluationSample, Metric, MetricRow};
use serde_json::Value;

/// Evaluates a dataset against metrics without computing real scores.
///
/// Wired in when no external metrics library is configured (`NULL` tag in
/// the provider factory); each metric in the returned rows is `null`.
pub struct NullEvaluationProvider {
    llm_label: String,
    embeddings_label: String,
}

impl NullEvaluationProvider {
    /// `llm_label`/`embeddings_label` identify the generation/embedding
    /// models this evaluation run was configured against, for logging —
    /// they are not used to compute scores.
    #[must_use]
    pub fn new(llm_label: impl Into<String>, embeddings_label: impl Into<String>) -> Self {
        Self {
            llm_label: llm_label.into(),
            embeddings_label: embeddings_label.into(),
        }
    }
}

#[async_trait]
impl EvaluationProvider for NullEvaluationProvider {
    async fn evaluate(&self, dataset: &[EvaluationSample], metrics: &[Metric]) -> Result<Vec<MetricRow>> {
        tracing::warn!(
            llm = %self.llm_label,
            embeddings = %self.embeddings_label,
            samples = dataset.len(),
            metrics = metrics.len(),
            "no evaluation provider configured, reporting unscored metrics"
        );

        Ok(dataset
            .iter()
            .map(|_| metrics.iter().map(|m| (m.name.clone(), Value::Null)).collect())
            .collect())
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(question: &str) -> EvaluationSample {
        EvaluationSample {
            question: question.to_string(),
            answer: "answer".to_string(),
            contexts: vec!["context".to_string()],
            ground_truth: None,
        }
    }

    #[tokio::test]
    async fn evaluate_returns_one_null_row_per_sample() {
        let provider = NullEvaluationProvider::new("gemini-1.5-flash", "text-embedding-004");
        let dataset = vec![sample("q1"), sample("q2")];
        let metrics = vec![Metric {
            name: "faithfulness".to_string(),
        }];

        let rows = provider.evaluate(&dataset, &metrics).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("faithfulness"), Some(&Value::Null));
    }

    #[tokio::test]
    async fn evaluate_on_empty_dataset_returns_empty() {
        let provider = NullEvaluationProvider::new("gemini-1.5-flash", "text-embedding-004");
        let rows = provider.evaluate(&[], &[]).await.unwrap();
        assert!(rows.is_empty());
    }
}
