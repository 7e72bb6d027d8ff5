//! The closed set of outcome signals returned across the HTTP boundary.
//!
//! Every ingestion/indexing/search/answer step reports one of these instead
//! of relying on exceptions for control flow (§9, "Exception-driven control
//! flow").

use serde::{Deserialize, Serialize};

/// A closed enum of outcome signals. New variants require a spec change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// File passed MIME/size validation.
    FileValidateSuccessfully,
    /// File MIME type is not in the configured allow-list.
    FileTypeNotSupported,
    /// File exceeds the configured maximum size.
    FileSizeExceeded,
    /// File was streamed to disk and an `Asset` row was created.
    FileUploadSuccess,
    /// File upload failed (I/O or storage error).
    FileUploadFailed,
    /// An ingestion batch started processing.
    FileProcessingStarted,
    /// An ingestion batch finished processing.
    FileProcessingCompleted,
    /// The referenced project does not exist and could not be materialized.
    ProjectNotFound,
    /// Vector indexing failed on some page of the push loop.
    IndexingFailed,
    /// Vector indexing completed for all pages.
    IndexingCompleted,
    /// Collection info lookup failed.
    FetchingCollectionInfoFailed,
    /// Collection info lookup succeeded.
    FetchingCollectionInfoCompleted,
    /// Hybrid search failed (collection missing, provider error).
    SearchFailed,
    /// Hybrid search completed (possibly with zero results).
    SearchCompleted,
    /// Answer generation failed.
    AnswerGenerationFailed,
    /// Answer generation completed.
    AnswerGenerationCompleted,
}

impl Signal {
    /// The conventional HTTP status code for this signal, per §7:
    /// 4xx for validation/not-found, 5xx for storage/provider failures.
    #[must_use]
    pub fn http_status(self) -> u16 {
        match self {
            Self::FileValidateSuccessfully
            | Self::FileUploadSuccess
            | Self::FileProcessingStarted
            | Self::FileProcessingCompleted
            | Self::IndexingCompleted
            | Self::FetchingCollectionInfoCompleted
            | Self::SearchCompleted
            | Self::AnswerGenerationCompleted => 200,
            Self::FileTypeNotSupported | Self::FileSizeExceeded => 400,
            Self::ProjectNotFound => 404,
            Self::FileUploadFailed
            | Self::IndexingFailed
            | Self::FetchingCollectionInfoFailed
            | Self::SearchFailed
            | Self::AnswerGenerationFailed => 500,
        }
    }
}
