//! Postgres connection pooling (§4.2, §11).

use r2d2::Pool;
use r2d2_postgres::postgres::NoTls;
use r2d2_postgres::PostgresConnectionManager;
use ragcore_domain::error::{Error, Result};
use std::time::Duration;

/// A pooled synchronous Postgres connection.
pub type PooledConnection = r2d2::PooledConnection<PostgresConnectionManager<NoTls>>;

/// Tuning knobs for the connection pool.
#[derive(Debug, Clone, Copy)]
pub struct PoolSettings {
    /// Maximum number of connections in the pool.
    pub max_connections: u32,
    /// Minimum number of idle connections the pool keeps warm.
    pub min_idle: u32,
    /// Maximum lifetime of a connection before it is recycled.
    pub max_lifetime: Duration,
    /// Maximum time a connection can sit idle before being dropped.
    pub idle_timeout: Duration,
    /// Timeout waiting for a connection from the pool.
    pub connection_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 20,
            min_idle: 2,
            max_lifetime: Duration::from_secs(1800),
            idle_timeout: Duration::from_secs(600),
            connection_timeout: Duration::from_secs(30),
        }
    }
}

/// A `Clone`-cheap wrapper around an `r2d2` Postgres pool. Repository
/// implementations borrow a connection per call via
/// [`DatabasePool::get_connection`]; every async repository method wraps the
/// blocking call in `tokio::task::spawn_blocking` since `r2d2_postgres` is
/// synchronous.
#[derive(Clone)]
pub struct DatabasePool {
    pool: Pool<PostgresConnectionManager<NoTls>>,
}

impl DatabasePool {
    /// Build a pool against `connection_url` (a `postgresql://` URL).
    pub fn connect(connection_url: &str, settings: PoolSettings) -> Result<Self> {
        let config = connection_url
            .parse()
            .map_err(|e| Error::config(format!("invalid Postgres connection URL: {e}")))?;
        let manager = PostgresConnectionManager::new(config, NoTls);

        let pool = Pool::builder()
            .max_size(settings.max_connections)
            .min_idle(Some(settings.min_idle))
            .max_lifetime(Some(settings.max_lifetime))
            .idle_timeout(Some(settings.idle_timeout))
            .connection_timeout(settings.connection_timeout)
            .build(manager)
            .map_err(|e| Error::storage_with_source("failed to build Postgres connection pool", e))?;

        Ok(Self { pool })
    }

    /// Check out a pooled connection.
    pub fn get_connection(&self) -> Result<PooledConnection> {
        self.pool
            .get()
            .map_err(|e| Error::storage_with_source("failed to acquire Postgres connection", e))
    }

    /// The underlying `r2d2` pool, for collaborators (e.g. the `pgvector`
    /// store provider) that need their own typed handle to it.
    #[must_use]
    pub fn raw(&self) -> Pool<PostgresConnectionManager<NoTls>> {
        self.pool.clone()
    }

    /// Run `SELECT 1` against the pool.
    pub async fn health_check(&self) -> Result<()> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| Error::storage_with_source("failed to acquire Postgres connection", e))?;
            conn.execute("SELECT 1", &[])
                .map_err(|e| Error::storage_with_source("Postgres health check failed", e))?;
            Ok(())
        })
        .await
        .map_err(|e| Error::internal(format!("health check task panicked: {e}")))?
    }
}
