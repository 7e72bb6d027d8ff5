//! Error taxonomy for the RAG core.
//!
//! Validation errors carry no side effects; storage/provider/consistency
//! errors map to a [`Signal`](crate::signal::Signal) and an HTTP status at
//! the server edge.

use thiserror::Error;

/// Result type alias used throughout the core.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the RAG core.
#[derive(Error, Debug)]
pub enum Error {
    /// A file or request failed validation (bad MIME, oversized, malformed vector, ...).
    #[error("validation error: {message}")]
    Validation {
        /// Human readable description.
        message: String,
    },

    /// A relational-storage operation failed (connectivity, constraint, transaction abort).
    #[error("storage error: {message}")]
    Storage {
        /// Human readable description.
        message: String,
        /// Optional underlying error.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The vector store reported a failure distinct from generic storage
    /// (missing collection, dimension mismatch, index creation failure).
    #[error("vector store error: {message}")]
    VectorDb {
        /// Human readable description.
        message: String,
    },

    /// An LLM or embedding provider failed (timeout, malformed response, empty generation).
    #[error("provider error: {message}")]
    Provider {
        /// Human readable description.
        message: String,
    },

    /// A referenced resource does not exist.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// Disk I/O failed while streaming a file or reading chunk content.
    #[error("I/O error: {message}")]
    Io {
        /// Human readable description.
        message: String,
        /// Optional underlying error.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration is missing or malformed.
    #[error("configuration error: {message}")]
    Config {
        /// Human readable description.
        message: String,
    },

    /// Catch-all for internal invariant violations.
    #[error("internal error: {message}")]
    Internal {
        /// Human readable description.
        message: String,
    },
}

impl Error {
    /// Build a [`Error::Validation`].
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Build a [`Error::Storage`] with no source.
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage {
            message: message.into(),
            source: None,
        }
    }

    /// Build a [`Error::Storage`] with a source error attached.
    pub fn storage_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Storage {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Build a [`Error::VectorDb`].
    pub fn vector_db<S: Into<String>>(message: S) -> Self {
        Self::VectorDb {
            message: message.into(),
        }
    }

    /// Build a [`Error::Provider`].
    pub fn provider<S: Into<String>>(message: S) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    /// Build a [`Error::NotFound`].
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Build a [`Error::Io`] with no source.
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Build a [`Error::Io`] with a source error attached.
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Build a [`Error::Config`].
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Build a [`Error::Internal`].
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Classify this error into one of the closed [`Signal`](crate::signal::Signal) variants
    /// most specific to its kind. Callers that have a more precise signal in
    /// mind (e.g. `file_size_exceeded` vs. generic validation) should not use
    /// this and should set the signal explicitly instead.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// True for errors that should roll back the current transaction.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage { .. } | Self::VectorDb { .. })
    }
}
