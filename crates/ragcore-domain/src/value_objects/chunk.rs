use serde::{Deserialize, Serialize};

/// A fragment of an asset's text (§3).
///
/// `chunk_order` is 1-based and dense within `(project_id, asset_id)`;
/// chunks are append-only per (re)ingestion, and a project reset deletes all
/// of a project's chunks before re-inserting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataChunk {
    /// Internal surrogate id, `None` until persisted.
    pub id: Option<i64>,
    /// Owning project id.
    pub project_id: i64,
    /// Owning asset id.
    pub asset_id: i64,
    /// The chunk's raw text.
    pub chunk_text: String,
    /// 1-based order within the asset.
    pub chunk_order: i32,
}

impl DataChunk {
    /// Build a new, not-yet-persisted chunk.
    #[must_use]
    pub fn new(project_id: i64, asset_id: i64, chunk_text: String, chunk_order: i32) -> Self {
        Self {
            id: None,
            project_id,
            asset_id,
            chunk_text,
            chunk_order,
        }
    }
}
