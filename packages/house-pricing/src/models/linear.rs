//! Linear regression artifacts.
//!
//! OLS, Lasso and Ridge differ only in how they were fitted; at inference
//! they are all `intercept + coefficients · x`. Artifacts are JSON:
//!
//! ```json
//! {
//!   "name": "ridge",
//!   "intercept": -1250000.0,
//!   "coefficients": [12.5, 0.42, ...],
//!   "feature_names": ["MSSubClass", "LotArea", ...]
//! }
//! ```
//!
//! `feature_names` is optional; when present it is checked against the
//! schema layout at load time.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::traits::model::RegressionModel;
use crate::types::vector::FeatureVector;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub name: String,
    pub intercept: f64,
    pub coefficients: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
}

impl LinearModel {
    pub fn new(name: impl Into<String>, intercept: f64, coefficients: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            intercept,
            coefficients,
            feature_names: None,
        }
    }

    /// Read an artifact from disk.
    pub fn load(path: &Path) -> ModelResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&contents).map_err(|source| ModelError::Format {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Number of input columns the model was fitted on.
    pub fn width(&self) -> usize {
        self.coefficients.len()
    }

    /// Check this model against the encoded layout.
    pub fn check_layout(&self, layout: &[String]) -> ModelResult<()> {
        if self.width() != layout.len() {
            return Err(ModelError::DimensionMismatch {
                expected: layout.len(),
                actual: self.width(),
            });
        }

        if let Some(names) = &self.feature_names {
            if names.len() != layout.len() {
                return Err(ModelError::DimensionMismatch {
                    expected: layout.len(),
                    actual: names.len(),
                });
            }
            if let Some((index, (found, expected))) = names
                .iter()
                .zip(layout)
                .enumerate()
                .find(|(_, (found, expected))| found != expected)
            {
                return Err(ModelError::LayoutMismatch {
                    index,
                    expected: expected.clone(),
                    found: found.clone(),
                });
            }
        }

        Ok(())
    }
}

impl RegressionModel for LinearModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, features: &FeatureVector) -> ModelResult<f64> {
        if features.len() != self.width() {
            return Err(ModelError::DimensionMismatch {
                expected: self.width(),
                actual: features.len(),
            });
        }

        let prediction = self.intercept
            + self
                .coefficients
                .iter()
                .zip(features.as_slice())
                .map(|(c, x)| c * x)
                .sum::<f64>();

        if prediction.is_finite() {
            Ok(prediction)
        } else {
            Err(ModelError::NonFinite(prediction))
        }
    }
}
