//! Fitted model artifacts.

pub mod linear;
pub mod registry;

pub use linear::LinearModel;
pub use registry::{default_model_files, load_ensemble, DEFAULT_MODEL_FILES};
