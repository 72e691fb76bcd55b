//! Startup loading of model artifacts into an [`EnsemblePredictor`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::error::{PricingError, Result};
use crate::models::linear::LinearModel;
use crate::pipeline::ensemble::EnsemblePredictor;
use crate::traits::model::RegressionModel;
use crate::types::schema::FeatureSchema;

/// Artifact files shipped with the service.
pub const DEFAULT_MODEL_FILES: &[&str] = &["lr_model.json", "lasso_model.json", "ridge_model.json"];

/// Load every artifact in `files` from `dir` and validate it against the
/// schema layout. Any failure aborts the load.
pub fn load_ensemble(
    dir: &Path,
    files: &[String],
    schema: &FeatureSchema,
) -> Result<EnsemblePredictor> {
    let mut members: Vec<Arc<dyn RegressionModel>> = Vec::with_capacity(files.len());

    for file in files {
        let path: PathBuf = dir.join(file);
        let model = LinearModel::load(&path).map_err(|source| PricingError::Model {
            model: file.clone(),
            source,
        })?;

        model
            .check_layout(schema.encoded_layout())
            .map_err(|source| PricingError::Model {
                model: model.name.clone(),
                source,
            })?;

        info!(
            model = %model.name,
            path = %path.display(),
            width = model.width(),
            "Loaded regression model"
        );
        members.push(Arc::new(model));
    }

    EnsemblePredictor::new(members)
}

/// Default artifact file names as owned strings.
pub fn default_model_files() -> Vec<String> {
    DEFAULT_MODEL_FILES.iter().map(|s| s.to_string()).collect()
}
