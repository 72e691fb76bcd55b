//! Prompt-to-price orchestration.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{PricingError, Result};
use crate::pipeline::encode::encode;
use crate::pipeline::ensemble::EnsemblePredictor;
use crate::pipeline::extract::Extractor;
use crate::pipeline::normalize::normalize;
use crate::traits::generator::TextGenerator;
use crate::types::record::{CleanRecord, ExtractionOutcome};
use crate::types::schema::FeatureSchema;

/// Prices at or beyond this magnitude have no integer representation.
const MAX_REPORTABLE_PRICE: f64 = i64::MAX as f64;

/// Result of one estimate.
#[derive(Debug, Clone, Serialize)]
pub struct Estimate {
    /// Ensemble mean
    pub price: f64,

    /// Features the estimate was computed from
    pub features: CleanRecord,

    /// Whether the language model reply was usable
    pub extraction: ExtractionOutcome,
}

impl Estimate {
    /// Price truncated toward zero, as reported to clients.
    pub fn rounded_price(&self) -> i64 {
        self.price.trunc() as i64
    }
}

/// Extractor → normalizer → encoder → ensemble, run in strict sequence.
///
/// Holds only immutable shared state; one instance serves all requests.
#[derive(Clone)]
pub struct PricePipeline {
    schema: Arc<FeatureSchema>,
    extractor: Extractor,
    ensemble: Arc<EnsemblePredictor>,
}

impl PricePipeline {
    pub fn new(
        schema: Arc<FeatureSchema>,
        generator: Arc<dyn TextGenerator>,
        ensemble: Arc<EnsemblePredictor>,
    ) -> Self {
        Self {
            extractor: Extractor::new(generator, schema.clone()),
            schema,
            ensemble,
        }
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn ensemble(&self) -> &EnsemblePredictor {
        &self.ensemble
    }

    /// Estimate a price for a free-text description.
    ///
    /// Only ensemble failures and prices that cannot be reported as an
    /// integer are errors; extraction problems degrade to default feature
    /// values.
    pub async fn estimate(&self, prompt: &str) -> Result<Estimate> {
        let start = Instant::now();

        let extraction = self.extractor.extract(prompt).await;
        let features = normalize(&extraction);
        let vector = encode(&self.schema, &features);
        let price = self.ensemble.predict(&vector)?;
        if price.abs() >= MAX_REPORTABLE_PRICE {
            warn!(price, "Ensemble mean outside reportable range");
            return Err(PricingError::InvalidPrice(price));
        }

        info!(
            extraction = ?extraction.outcome(),
            price,
            duration_ms = start.elapsed().as_millis() as u64,
            "Estimated price"
        );

        Ok(Estimate {
            price,
            features,
            extraction: extraction.outcome(),
        })
    }
}
