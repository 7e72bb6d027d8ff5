use serde::{Deserialize, Serialize};

/// The kind of asset stored for a project. `FILE` is the only kind the
/// ingestion pipeline produces today; the enum stays open for future
/// asset kinds (e.g. URL imports) without a schema migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    /// An uploaded file.
    File,
}

/// Metadata for one uploaded file (§3).
///
/// `asset_name` is the stored (sanitized + suffixed) filename and is unique
/// within a project; it doubles as the filesystem filename of the stored
/// file under `files_dir/<project_id>/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Internal surrogate id, `None` until persisted.
    pub id: Option<i64>,
    /// Owning project id.
    pub project_id: i64,
    /// Kind of asset.
    pub asset_type: AssetType,
    /// Stored filename, unique within the project.
    pub asset_name: String,
    /// Size in bytes as written to disk.
    pub asset_size: i64,
}

impl Asset {
    /// Build a new, not-yet-persisted asset record.
    #[must_use]
    pub fn new(project_id: i64, asset_name: String, asset_size: i64) -> Self {
        Self {
            id: None,
            project_id,
            asset_type: AssetType::File,
            asset_name,
            asset_size,
        }
    }
}
