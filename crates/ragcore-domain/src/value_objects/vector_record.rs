use super::Language;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// One row in a per-project vector collection (§3, §4.1).
///
/// Invariants enforced by the store, not by this type: all vectors in a
/// collection share dimension D, and `fts_tokens` is always derived from
/// `(language, text)` by the storage-level trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    /// Surrogate id assigned by the store.
    pub id: i64,
    /// Original chunk text.
    pub text: String,
    /// Dense embedding vector.
    pub vector: Vec<f32>,
    /// The `DataChunk` this record was derived from.
    pub chunk_id: i64,
    /// Tokenization language.
    pub language: Language,
    /// Free-form metadata, possibly empty.
    pub metadata: HashMap<String, Value>,
}

/// Metadata about a collection, returned by `collection_info` (§4.1,
/// supplemented per §12 with the fields a `pg_tables` introspection query
/// exposes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionInfo {
    /// Schema the table lives in (always `public` for this store).
    pub schema_name: String,
    /// The collection's table name.
    pub table_name: String,
    /// Table owner role, as reported by `pg_tables`.
    pub owner: String,
    /// Tablespace name, if any.
    pub tablespace: Option<String>,
    /// Whether the table has at least one index.
    pub has_indexes: bool,
    /// Current row count.
    pub record_count: i64,
}
