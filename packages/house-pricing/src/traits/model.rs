//! Regression model trait for ensemble members.

use crate::error::ModelResult;
use crate::types::vector::FeatureVector;

/// A pre-fitted regression model.
///
/// Inference must not mutate the model; instances are shared read-only
/// across concurrent requests.
#[cfg_attr(test, mockall::automock)]
pub trait RegressionModel: Send + Sync {
    /// Name used in logs and errors.
    fn name(&self) -> &str;

    /// Predict a single scalar for one row.
    fn predict(&self, features: &FeatureVector) -> ModelResult<f64>;
}
