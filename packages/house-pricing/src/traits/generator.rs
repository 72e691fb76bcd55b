//! Text generation trait for the extraction step.

use async_trait::async_trait;

use crate::error::Result;

/// A language model that turns an instruction into text.
///
/// Implementations wrap a specific provider (Gemini, OpenAI, a local model)
/// and return the raw response text. Parsing is the extractor's job.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for the full prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
