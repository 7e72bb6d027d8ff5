//! Evaluation provider adapters.

mod null;

pub use null::NullEvaluationProvider;
