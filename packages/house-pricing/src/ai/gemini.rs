//! Gemini implementation of the [`TextGenerator`] trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::GeminiClient;
//!
//! let generator = Arc::new(GeminiClient::from_env()?);
//! let pipeline = PricePipeline::new(schema, generator, ensemble);
//! ```

use async_trait::async_trait;
use gemini_client::{GeminiClient, GenerateRequest};

use crate::error::{PricingError, Result};
use crate::traits::generator::TextGenerator;

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest::user_text(prompt).temperature(0.0);

        let response = self
            .generate_content(request)
            .await
            .map_err(|e| PricingError::Generation(Box::new(e)))?;

        Ok(response.text)
    }
}
