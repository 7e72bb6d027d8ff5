use serde::{Deserialize, Serialize};

/// A logical namespace that owns assets and chunks.
///
/// Materialized lazily: the first reference to a project id creates the row
/// (get-or-create); projects are never deleted implicitly (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// The project's integer identifier.
    pub id: i64,
}

impl Project {
    /// Wrap a raw identifier.
    #[must_use]
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}
