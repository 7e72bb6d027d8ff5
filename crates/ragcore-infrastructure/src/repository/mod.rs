//! Postgres-backed implementations of the repository ports (§4.2).

mod asset;
mod chunk;
mod project;

pub use asset::PostgresAssetRepository;
pub use chunk::PostgresChunkRepository;
pub use project::PostgresProjectRepository;
