//! Configuration loading and typed sections (§6, §11).

pub mod loader;
pub mod raw;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{
    AppConfig, EmbeddingConfig, FileConfig, GenerationConfig, LangConfig, PostgresConfig,
    VectorDbConfig,
};
