//! Typed errors for the pricing library.
//!
//! Only inference and configuration problems are errors. Malformed
//! extraction output and invalid field values are absorbed by the
//! normalizer and never show up here.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while producing an estimate.
#[derive(Debug, Error)]
pub enum PricingError {
    /// Text generation service failed
    #[error("text generation error: {0}")]
    Generation(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// An ensemble member failed; the whole prediction fails with it
    #[error("model '{model}' failed: {source}")]
    Model {
        model: String,
        #[source]
        source: ModelError,
    },

    /// Ensemble constructed without members
    #[error("ensemble has no models")]
    EmptyEnsemble,

    /// Ensemble mean cannot be reported as a price
    #[error("unusable price estimate: {0}")]
    InvalidPrice(f64),
}

/// Errors raised by a single regression model, at load or inference time.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Artifact file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Artifact file is not a valid model description
    #[error("invalid model artifact {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Input width differs from what the model was fitted on
    #[error("expected {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Artifact was fitted on a different column order
    #[error("column {index} is '{found}', expected '{expected}'")]
    LayoutMismatch {
        index: usize,
        expected: String,
        found: String,
    },

    /// Model produced NaN or infinity
    #[error("non-finite prediction: {0}")]
    NonFinite(f64),

    /// Model could not be invoked
    #[error("inference failed: {0}")]
    Inference(String),
}

/// Result type alias for pricing operations.
pub type Result<T> = std::result::Result<T, PricingError>;

/// Result type alias for single-model operations.
pub type ModelResult<T> = std::result::Result<T, ModelError>;
