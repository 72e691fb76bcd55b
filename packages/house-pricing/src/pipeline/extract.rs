//! Feature extraction: one language model call, tolerant parsing.
//!
//! Nothing here returns an error. A failed call, a non-JSON reply or a
//! reply that is not a JSON object all come back as
//! [`Extraction::Unparseable`], which the normalizer turns into defaults.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::pipeline::prompts::format_extract_prompt;
use crate::traits::generator::TextGenerator;
use crate::types::record::{Extraction, RawRecord, UnparseableReason};
use crate::types::schema::FeatureSchema;

/// Sends prompts to a [`TextGenerator`] and parses the reply into a
/// [`RawRecord`].
#[derive(Clone)]
pub struct Extractor {
    generator: Arc<dyn TextGenerator>,
    schema: Arc<FeatureSchema>,
}

impl Extractor {
    pub fn new(generator: Arc<dyn TextGenerator>, schema: Arc<FeatureSchema>) -> Self {
        Self { generator, schema }
    }

    /// Extract raw features from a free-text prompt.
    ///
    /// Issues exactly one generation call; no retries.
    pub async fn extract(&self, prompt: &str) -> Extraction {
        let instruction = format_extract_prompt(&self.schema, prompt);

        match self.generator.generate(&instruction).await {
            Ok(text) => parse_extraction_response(&text),
            Err(e) => {
                warn!(error = %e, "Feature extraction call failed, falling back to defaults");
                Extraction::Unparseable(UnparseableReason::ServiceFailure(e.to_string()))
            }
        }
    }
}

/// Strip a Markdown code fence (optionally tagged `json`) around a reply.
pub fn strip_code_fences(response: &str) -> &str {
    let trimmed = response.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }

    let body = trimmed.trim_start_matches("```");
    let body = body
        .strip_prefix("json")
        .or_else(|| body.strip_prefix("JSON"))
        .unwrap_or(body);

    body.trim_end_matches("```").trim()
}

/// Parse a model reply into an [`Extraction`].
pub fn parse_extraction_response(response: &str) -> Extraction {
    let text = strip_code_fences(response);

    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, response_len = response.len(), "Extraction reply is not valid JSON");
            return Extraction::Unparseable(UnparseableReason::InvalidJson(e.to_string()));
        }
    };

    if !value.is_object() {
        warn!("Extraction reply is not a JSON object");
        return Extraction::Unparseable(UnparseableReason::NotAnObject);
    }

    // Every field is Option<Value> with a default, so any object deserializes.
    match serde_json::from_value::<RawRecord>(value) {
        Ok(raw) => {
            debug!(present = raw.present_count(), "Parsed extraction reply");
            Extraction::Parsed(raw)
        }
        Err(e) => Extraction::Unparseable(UnparseableReason::InvalidJson(e.to_string())),
    }
}
