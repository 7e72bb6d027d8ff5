//! Vector store provider adapters.

mod null;
mod pgvector_store;

pub use null::NullVectorStoreProvider;
pub use pgvector_store::PgVectorStoreProvider;
