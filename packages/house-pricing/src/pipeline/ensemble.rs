//! Ensemble prediction: arithmetic mean over independently fitted models.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{ModelError, PricingError, Result};
use crate::traits::model::RegressionModel;
use crate::types::vector::FeatureVector;

/// Immutable set of regression models, built once at startup and shared
/// read-only across requests.
#[derive(Clone)]
pub struct EnsemblePredictor {
    members: Vec<Arc<dyn RegressionModel>>,
}

impl std::fmt::Debug for EnsemblePredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnsemblePredictor")
            .field("members", &self.member_names())
            .finish()
    }
}

impl EnsemblePredictor {
    /// Build an ensemble. At least one member is required.
    pub fn new(members: Vec<Arc<dyn RegressionModel>>) -> Result<Self> {
        if members.is_empty() {
            return Err(PricingError::EmptyEnsemble);
        }
        Ok(Self { members })
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn member_names(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.name()).collect()
    }

    /// Mean of every member's prediction for `features`.
    ///
    /// Any member failure fails the whole prediction; there is no partial
    /// ensemble. A member returning NaN or infinity counts as a failure.
    pub fn predict(&self, features: &FeatureVector) -> Result<f64> {
        let mut predictions = Vec::with_capacity(self.members.len());

        for member in &self.members {
            let prediction = member
                .predict(features)
                .and_then(|p| {
                    if p.is_finite() {
                        Ok(p)
                    } else {
                        Err(ModelError::NonFinite(p))
                    }
                })
                .map_err(|source| {
                    warn!(model = member.name(), error = %source, "Ensemble member failed");
                    PricingError::Model {
                        model: member.name().to_string(),
                        source,
                    }
                })?;
            debug!(model = member.name(), prediction, "Ensemble member prediction");
            predictions.push(prediction);
        }

        let n = predictions.len() as f64;
        let sum: f64 = predictions.iter().sum();
        let mean = if sum.is_finite() {
            sum / n
        } else {
            // Finite members whose sum overflows
            predictions.iter().map(|p| p / n).sum::<f64>()
        };

        if !mean.is_finite() {
            return Err(PricingError::InvalidPrice(mean));
        }

        Ok(mean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::model::MockRegressionModel;

    fn member(name: &'static str, output: f64) -> Arc<dyn RegressionModel> {
        let mut model = MockRegressionModel::new();
        model.expect_name().return_const(name.to_string());
        model.expect_predict().times(1).returning(move |_| Ok(output));
        Arc::new(model)
    }

    #[test]
    fn test_mean_of_three() {
        let ensemble = EnsemblePredictor::new(vec![
            member("lr", 100.0),
            member("lasso", 110.0),
            member("ridge", 120.0),
        ])
        .unwrap();

        let prediction = ensemble.predict(&FeatureVector::zeros(17)).unwrap();
        assert_eq!(prediction, 110.0);
    }

    #[test]
    fn test_single_member_passthrough() {
        let ensemble = EnsemblePredictor::new(vec![member("only", 181_500.25)]).unwrap();
        assert_eq!(
            ensemble.predict(&FeatureVector::zeros(17)).unwrap(),
            181_500.25
        );
    }

    #[test]
    fn test_empty_ensemble_rejected() {
        assert!(matches!(
            EnsemblePredictor::new(vec![]),
            Err(PricingError::EmptyEnsemble)
        ));
    }

    #[test]
    fn test_member_failure_fails_prediction() {
        let mut failing = MockRegressionModel::new();
        failing.expect_name().return_const("lasso".to_string());
        failing.expect_predict().returning(|_| {
            Err(ModelError::DimensionMismatch {
                expected: 17,
                actual: 3,
            })
        });

        let mut after = MockRegressionModel::new();
        after.expect_name().return_const("ridge".to_string());
        after.expect_predict().never();

        let ensemble = EnsemblePredictor::new(vec![
            member("lr", 100.0),
            Arc::new(failing),
            Arc::new(after),
        ])
        .unwrap();

        match ensemble.predict(&FeatureVector::zeros(17)) {
            Err(PricingError::Model { model, source }) => {
                assert_eq!(model, "lasso");
                assert!(matches!(source, ModelError::DimensionMismatch { .. }));
            }
            other => panic!("expected model error, got {:?}", other),
        }
    }

    #[test]
    fn test_every_member_sees_same_input() {
        let input = FeatureVector::from_values(vec![1.0, 2.0, 3.0]);
        let members: Vec<Arc<dyn RegressionModel>> = (0..3)
            .map(|i| {
                let expected = input.clone();
                let mut model = MockRegressionModel::new();
                model.expect_name().return_const(format!("m{}", i));
                model
                    .expect_predict()
                    .withf(move |f| *f == expected)
                    .times(1)
                    .returning(|f| Ok(f.as_slice().iter().sum()));
                Arc::new(model) as Arc<dyn RegressionModel>
            })
            .collect();

        let ensemble = EnsemblePredictor::new(members).unwrap();
        assert_eq!(ensemble.predict(&input).unwrap(), 6.0);
    }

    #[test]
    fn test_large_members_do_not_overflow() {
        let ensemble = EnsemblePredictor::new(vec![
            member("lr", f64::MAX),
            member("lasso", f64::MAX),
        ])
        .unwrap();

        assert_eq!(ensemble.predict(&FeatureVector::zeros(17)).unwrap(), f64::MAX);
    }

    #[test]
    fn test_non_finite_member_fails_prediction() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let ensemble =
                EnsemblePredictor::new(vec![member("lr", 100.0), member("ridge", bad)]).unwrap();

            match ensemble.predict(&FeatureVector::zeros(17)) {
                Err(PricingError::Model { model, source }) => {
                    assert_eq!(model, "ridge");
                    assert!(matches!(source, ModelError::NonFinite(_)));
                }
                other => panic!("expected model error for {}, got {:?}", bad, other),
            }
        }
    }
}
