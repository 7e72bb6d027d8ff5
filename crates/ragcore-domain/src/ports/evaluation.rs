//! Evaluation provider port (§4.5, §4.7).

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// One (question, answer, contexts, ground_truth) tuple handed to the
/// evaluation provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationSample {
    /// The test query.
    pub question: String,
    /// The generated answer.
    pub answer: String,
    /// Retrieved context texts used to build the prompt.
    pub contexts: Vec<String>,
    /// Caller-supplied reference answer, if any (§9: not every evaluation
    /// case has a ground truth, so this is `Option`).
    pub ground_truth: Option<String>,
}

/// One row of the per-query metric table returned by `evaluate`. The
/// metric values themselves are opaque to the core (§4.5).
pub type MetricRow = HashMap<String, Value>;

/// Metric metadata, opaque to the core beyond its name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metric {
    /// The metric's name (e.g. `"faithfulness"`, `"answer_relevancy"`).
    pub name: String,
}

/// A pluggable evaluation harness (e.g. RAGAS). The core only orchestrates
/// running a batch through retrieval + generation and forwarding the
/// dataset; metric computation itself is an external collaborator (§1).
#[async_trait]
pub trait EvaluationProvider: Send + Sync {
    /// Run `dataset` through `metrics` and return one row per sample.
    async fn evaluate(
        &self,
        dataset: &[EvaluationSample],
        metrics: &[Metric],
    ) -> Result<Vec<MetricRow>>;

    /// A short identifier for logging/metrics (e.g. `"ragas"`).
    fn provider_name(&self) -> &str;
}
