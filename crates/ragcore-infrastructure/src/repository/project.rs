//! Postgres-backed [`ProjectRepository`] (§4.2).

use crate::database::DatabasePool;
use async_trait::async_trait;
use ragcore_domain::error::{Error, Result};
use ragcore_domain::ports::ProjectRepository;
use ragcore_domain::value_objects::Project;

/// Projects are materialized lazily into a single `(id)` table.
pub struct PostgresProjectRepository {
    pool: DatabasePool,
}

impl PostgresProjectRepository {
    #[must_use]
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn get_or_create_project(&self, id: i64) -> Result<Project> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get_connection()?;
            conn.execute(
                "INSERT INTO projects (id) VALUES ($1) ON CONFLICT (id) DO NOTHING",
                &[&id],
            )
            .map_err(|e| Error::storage_with_source("failed to upsert project", e))?;
            Ok(Project::new(id))
        })
        .await
        .map_err(|e| Error::internal(format!("project task panicked: {e}")))?
    }

    async fn get_project_by_id(&self, id: i64) -> Result<Option<Project>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get_connection()?;
            let row = conn
                .query_opt("SELECT id FROM projects WHERE id = $1", &[&id])
                .map_err(|e| Error::storage_with_source("failed to fetch project", e))?;
            Ok(row.map(|row| Project::new(row.get::<_, i64>(0))))
        })
        .await
        .map_err(|e| Error::internal(format!("project task panicked: {e}")))?
    }
}
