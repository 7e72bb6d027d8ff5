//! Application layer for RAGCore.
//!
//! Orchestrates the domain ports into three controllers: ingestion, NLP
//! (indexing/retrieval/generation) and evaluation.
//! This crate depends only on `ragcore-domain`; concrete providers and
//! repositories are injected via the [`services::Services`] record built by
//! `ragcore-infrastructure` at startup (§9, "Global app state").

pub mod chunking;
pub mod controllers;
pub mod sanitize;
pub mod services;
pub mod template_catalog;

pub use controllers::evaluation::EvaluationController;
pub use controllers::ingestion::{IngestionController, ProcessOutcome, UploadOutcome};
pub use controllers::nlp::{AnswerOutcome, NlpController, PushOutcome};
pub use services::Services;
