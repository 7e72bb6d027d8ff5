use serde::{Deserialize, Serialize};

/// A transient hybrid-search result: text plus a fused score where higher
/// is better (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedDocument {
    /// The document's text.
    pub text: String,
    /// Fused (RRF) relevance score; higher is better.
    pub score: f64,
}

impl RetrievedDocument {
    /// Build a new retrieved document.
    #[must_use]
    pub fn new(text: impl Into<String>, score: f64) -> Self {
        Self {
            text: text.into(),
            score,
        }
    }
}
