//! Relational schema bootstrap for the core tables (§3, §4.2).
//!
//! Mirrors the self-provisioning pattern the vector store provider uses for
//! its own per-collection tables: `CREATE TABLE IF NOT EXISTS`, run once
//! against the pool at startup, so the service can come up against a fresh
//! database without a separate migration tool.

use crate::database::DatabasePool;
use ragcore_domain::error::{Error, Result};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS projects (
        id BIGINT PRIMARY KEY
    );

    CREATE TABLE IF NOT EXISTS assets (
        id BIGSERIAL PRIMARY KEY,
        project_id BIGINT NOT NULL REFERENCES projects(id),
        asset_type TEXT NOT NULL,
        asset_name TEXT NOT NULL,
        asset_size BIGINT NOT NULL,
        UNIQUE (project_id, asset_name)
    );

    CREATE TABLE IF NOT EXISTS chunks (
        id BIGSERIAL PRIMARY KEY,
        project_id BIGINT NOT NULL REFERENCES projects(id),
        asset_id BIGINT NOT NULL REFERENCES assets(id),
        chunk_text TEXT NOT NULL,
        chunk_order INT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS chunks_project_id_idx ON chunks (project_id);
    CREATE INDEX IF NOT EXISTS chunks_asset_id_idx ON chunks (asset_id);
";

/// Create `projects`, `assets` and `chunks` if they don't already exist,
/// including the `(project_id, asset_name)` uniqueness constraint §3
/// requires. Safe to call on every startup.
pub async fn run_migrations(pool: &DatabasePool) -> Result<()> {
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut conn = pool.get_connection()?;
        conn.batch_execute(SCHEMA)
            .map_err(|e| Error::storage_with_source("failed to run schema migrations", e))
    })
    .await
    .map_err(|e| Error::internal(format!("migration task panicked: {e}")))?
}
