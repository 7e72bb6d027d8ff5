//! HTTP handlers for the seven endpoints of §6, grouped by controller.

pub mod evaluation;
pub mod ingestion;
pub mod nlp;
