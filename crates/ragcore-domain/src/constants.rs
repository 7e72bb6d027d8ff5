//! Cross-cutting constants shared by every layer (§3, §4.1, §4.2).

/// Prefix used when deriving a collection's table name from a project id.
pub const COLLECTION_NAME_PREFIX: &str = "ragcore";

/// Default page size for paginated chunk listing (§4.2).
pub const DEFAULT_CHUNK_PAGE_SIZE: u32 = 50;

/// Default batch size for chunk persistence (§4.2).
pub const DEFAULT_CHUNK_BATCH_SIZE: usize = 100;

/// Derive the per-project collection name: a pure function of the project id.
#[must_use]
pub fn collection_name(project_id: i64) -> String {
    format!("{COLLECTION_NAME_PREFIX}_collection_{project_id}")
}
