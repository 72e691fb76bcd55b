//! The prompt-to-price pipeline.
//!
//! Stages, in order:
//! - Extract (one language model call, tolerant parsing)
//! - Normalize (coercion, category whitelists, defaults)
//! - Encode (fixed column layout, one-hot categories)
//! - Ensemble (mean over fitted regression models)

pub mod encode;
pub mod ensemble;
pub mod estimate;
pub mod extract;
pub mod normalize;
pub mod prompts;

pub use encode::encode;
pub use ensemble::EnsemblePredictor;
pub use estimate::{Estimate, PricePipeline};
pub use extract::{parse_extraction_response, strip_code_fences, Extractor};
pub use normalize::{coerce_category, coerce_float, coerce_int, coerce_text, normalize, normalize_raw};
pub use prompts::{format_extract_prompt, EXTRACT_PROMPT};
