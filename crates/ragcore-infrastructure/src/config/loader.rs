//! Configuration loader (§11).
//!
//! Merges, in order, a `ragcore.toml` file (if present) and the process
//! environment, then extracts into [`RawConfig`] before nesting it into
//! [`AppConfig`]. Built on `figment`, matching the rest of this crate's
//! preference for a declarative layered-source config builder over
//! hand-rolled env parsing.

use super::raw::RawConfig;
use super::types::AppConfig;
use figment::providers::{Env, Format, Toml};
use figment::Figment;
use ragcore_domain::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Default configuration file name looked up in the current directory.
pub const DEFAULT_CONFIG_FILENAME: &str = "ragcore.toml";

/// Loads [`AppConfig`] from a TOML file plus environment overrides.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Build a loader that only looks for the default file name in the
    /// current directory.
    #[must_use]
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Point the loader at an explicit TOML file.
    #[must_use]
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Load and validate the application configuration.
    ///
    /// Sources are merged in order (later overrides earlier): the TOML file
    /// (if it exists), then raw environment variables. Keys are flat and
    /// uppercase, so no prefix or separator is applied.
    pub fn load(&self) -> Result<AppConfig> {
        let path = self
            .config_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILENAME));

        let mut figment = Figment::new();
        if path.exists() {
            figment = figment.merge(Toml::file(&path));
        }
        figment = figment.merge(Env::raw());

        let raw: RawConfig = figment
            .extract()
            .map_err(|e| Error::config(format!("failed to load configuration: {e}")))?;

        let config = raw.into_app_config();
        validate(&config)?;
        Ok(config)
    }
}

fn validate(config: &AppConfig) -> Result<()> {
    if config.gemini_api_key.trim().is_empty() {
        return Err(Error::config("GEMINI_API_KEY must not be empty"));
    }
    if config.file.allowed_types.is_empty() {
        return Err(Error::config("FILE_ALLOWED_TYPES must list at least one MIME type"));
    }
    if config.file.max_size_mb == 0 {
        return Err(Error::config("FILE_MAX_SIZE must be greater than zero"));
    }
    if config.embedding.model_size == 0 {
        return Err(Error::config("EMBEDDING_MODEL_SIZE must be greater than zero"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_vars() -> Vec<(&'static str, &'static str)> {
        vec![
            ("APP_NAME", "ragcore"),
            ("APP_VERSION", "0.1.0"),
            ("GEMINI_API_KEY", "test-key"),
            ("FILE_ALLOWED_TYPES", "text/plain,application/pdf"),
            ("FILE_MAX_SIZE", "10"),
            ("FILE_DEFAULT_CHUNK_SIZE", "512"),
            ("GENERATION_BACKEND", "GEMINI"),
            ("GENERATION_MODEL_ID", "gemini-1.5-flash"),
            ("EMBEDDING_BACKEND", "GEMINI"),
            ("EMBEDDING_MODEL_ID", "text-embedding-004"),
            ("RAGAS_PROVIDER", "GEMINI"),
            ("EMBEDDING_MODEL_SIZE", "768"),
            ("INPUT_DAFAULT_MAX_CHARACTERS", "8000"),
            ("GENERATION_DAFAULT_MAX_TOKENS", "1024"),
            ("GENERATION_DAFAULT_TEMPERATURE", "0.7"),
            ("SYSTEM_INSTRUCTIONS", "Answer from context only."),
            ("VECTOR_DB_BACKEND", "PGVECTOR"),
            ("VECTOR_DB_DISTANCE_METHOD", "cosine"),
            ("VECTOR_DB_PGVEC_INDEX_THRESHOLD", "100"),
            ("POSTGRES_USERNAME", "postgres"),
            ("POSTGRES_PASSWORD", "postgres"),
            ("POSTGRES_HOST", "localhost"),
            ("POSTGRES_PORT", "5432"),
            ("POSTGRES_MAIN_DATABASE", "ragcore"),
            ("PRIMARY_LANG", "english"),
            ("DEFAULT_LANG", "english"),
        ]
    }

    #[test]
    fn loads_from_environment_when_no_file_present() {
        for (key, value) in env_vars() {
            std::env::set_var(key, value);
        }
        let dir = tempfile::tempdir().unwrap();
        let loader = ConfigLoader::new().with_config_path(dir.path().join("absent.toml"));
        let config = loader.load().unwrap();
        assert_eq!(config.app_name, "ragcore");
        assert_eq!(config.file.allowed_types.len(), 2);
        assert_eq!(config.postgres.port, 5432);
        for (key, _) in env_vars() {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn rejects_empty_api_key() {
        for (key, value) in env_vars() {
            std::env::set_var(key, value);
        }
        std::env::set_var("GEMINI_API_KEY", "");
        let dir = tempfile::tempdir().unwrap();
        let loader = ConfigLoader::new().with_config_path(dir.path().join("absent.toml"));
        assert!(loader.load().is_err());
        for (key, _) in env_vars() {
            std::env::remove_var(key);
        }
    }
}
