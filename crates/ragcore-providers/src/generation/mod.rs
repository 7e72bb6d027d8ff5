//! Generation (LLM) provider adapters.

mod gemini;
mod null;

pub use gemini::GeminiGenerationProvider;
pub use null::NullGenerationProvider;
