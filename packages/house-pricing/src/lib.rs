//! Prompt-to-Price Estimation Library
//!
//! Turns a free-text house description into a sale price estimate:
//!
//! 1. A language model extracts raw features as JSON.
//! 2. The normalizer coerces every field to its declared type, checks
//!    categories against fixed whitelists and fills gaps with defaults.
//! 3. The encoder lays the record out in the exact column order the models
//!    were fitted on, one-hot expanding categories.
//! 4. An ensemble of regression models is averaged.
//!
//! # Failure Policy
//!
//! Bad input data never fails a request: malformed model output and invalid
//! values degrade to defaults. Inference failures always fail the request.
//!
//! # Usage
//!
//! ```rust,ignore
//! use house_pricing::{FeatureSchema, PricePipeline, load_ensemble, default_model_files};
//!
//! let schema = Arc::new(FeatureSchema::house_prices());
//! let ensemble = load_ensemble(Path::new("models"), &default_model_files(), &schema)?;
//! let pipeline = PricePipeline::new(schema, generator, Arc::new(ensemble));
//!
//! let estimate = pipeline.estimate("3 bedroom ranch on a cul-de-sac, built 1998").await?;
//! println!("{}", estimate.rounded_price());
//! ```
//!
//! # Modules
//!
//! - [`types`] - Schema, records and the feature vector
//! - [`traits`] - Text generator and regression model seams
//! - [`pipeline`] - Extract, normalize, encode, ensemble
//! - [`models`] - Linear model artifacts and startup loading
//! - [`testing`] - Mock implementations for testing

pub mod error;
pub mod models;
pub mod pipeline;
pub mod testing;
pub mod traits;
pub mod types;

#[cfg(feature = "gemini")]
pub mod ai;

// Re-export core types at crate root
pub use error::{ModelError, PricingError};
pub use traits::{generator::TextGenerator, model::RegressionModel};
pub use types::{
    record::{CleanRecord, Extraction, ExtractionOutcome, RawRecord, UnparseableReason},
    schema::{
        BldgType, Category, CategoricalDomain, FeatureSchema, FieldKind, FieldSpec, LotConfig,
        MsZoning,
    },
    vector::FeatureVector,
};

// Re-export pipeline components
pub use pipeline::{
    encode, format_extract_prompt, normalize, normalize_raw, parse_extraction_response,
    strip_code_fences, EnsemblePredictor, Estimate, Extractor, PricePipeline,
};

// Re-export model loading
pub use models::{default_model_files, load_ensemble, LinearModel, DEFAULT_MODEL_FILES};

// Re-export testing utilities
pub use testing::{ConstantModel, FailingModel, MockGenerator, MockReply};
