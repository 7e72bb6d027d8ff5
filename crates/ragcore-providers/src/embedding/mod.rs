//! Embedding provider adapters.

mod gemini;
mod null;

pub use gemini::GeminiEmbeddingProvider;
pub use null::NullEmbeddingProvider;
