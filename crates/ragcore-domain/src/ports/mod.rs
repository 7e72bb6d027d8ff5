//! Provider and repository port traits (§4.5, §4.2).
//!
//! These are the abstraction seam between the core and pluggable
//! LLM / embedding / vector-store / evaluation providers, and between the
//! application layer and relational storage. Concrete implementations live
//! in `ragcore-providers` (providers) and `ragcore-infrastructure`
//! (repositories), selected at startup by tagged factories (§9).

pub mod embedding;
pub mod evaluation;
pub mod generation;
pub mod repository;
pub mod vector_store;

pub use embedding::{DocumentType, EmbeddingProvider};
pub use evaluation::{EvaluationProvider, EvaluationSample, Metric, MetricRow};
pub use generation::{GenerationProvider, MessageRole, ProviderMessage};
pub use repository::{AssetRepository, ChunkRepository, ProjectRepository};
pub use vector_store::VectorStoreProvider;
