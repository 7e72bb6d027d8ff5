//! Concrete provider adapters: Gemini generation + embedding clients, a
//! `pgvector`-backed hybrid vector store, and a null evaluation provider
//! (§10, §11).

pub mod embedding;
pub mod evaluation;
pub mod generation;
pub mod vector_store;

pub use embedding::{GeminiEmbeddingProvider, NullEmbeddingProvider};
pub use evaluation::NullEvaluationProvider;
pub use generation::{GeminiGenerationProvider, NullGenerationProvider};
pub use vector_store::{NullVectorStoreProvider, PgVectorStoreProvider};
