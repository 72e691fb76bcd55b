//! Integration tests for the full prompt-to-price pipeline.
//!
//! These tests verify the pipeline end to end with a mock generator:
//! 1. Extraction reply parsing (fenced, partial, garbage, failed calls)
//! 2. Default substitution
//! 3. Encoding
//! 4. Ensemble averaging and failure propagation

use std::sync::Arc;

use house_pricing::{
    encode, normalize, BldgType, CleanRecord, ConstantModel, EnsemblePredictor, Extraction,
    ExtractionOutcome, Extractor, FailingModel, FeatureSchema, LinearModel, MockGenerator,
    MockReply, MsZoning, PricePipeline, PricingError, RegressionModel,
};

fn schema() -> Arc<FeatureSchema> {
    Arc::new(FeatureSchema::house_prices())
}

/// Helper to build an ensemble from constant predictions.
fn constant_ensemble(values: &[f64]) -> Arc<EnsemblePredictor> {
    let members: Vec<Arc<dyn RegressionModel>> = values
        .iter()
        .enumerate()
        .map(|(i, v)| Arc::new(ConstantModel::new(format!("m{}", i), *v)) as Arc<dyn RegressionModel>)
        .collect();
    Arc::new(EnsemblePredictor::new(members).unwrap())
}

fn column(schema: &FeatureSchema, values: &[f64], name: &str) -> f64 {
    values[schema.column_index(name).unwrap()]
}

#[tokio::test]
async fn test_partial_extraction_scenario() {
    let schema = schema();
    let generator = Arc::new(MockGenerator::replying(
        "```json\n{\"MSZoning\": \"RL\", \"LotArea\": 12000, \"BldgType\": \"1Fam\"}\n```",
    ));
    let extractor = Extractor::new(generator.clone(), schema.clone());

    let extraction = extractor.extract("Single family home on a 12000 sq ft lot").await;
    assert_eq!(extraction.outcome(), ExtractionOutcome::Parsed);

    let clean = normalize(&extraction);
    assert_eq!(
        clean,
        CleanRecord {
            lot_area: 12000,
            ..CleanRecord::default()
        }
    );
    assert_eq!(clean.bldg_type, BldgType::SingleFamily);

    let vector = encode(&schema, &clean);
    let values = vector.as_slice();
    assert_eq!(vector.len(), 17);
    assert_eq!(column(&schema, values, "LotArea"), 12000.0);
    assert_eq!(column(&schema, values, "MSZoning_RL"), 1.0);
    for name in ["BldgType_2fmCon", "BldgType_Duplex", "BldgType_Twnhs", "BldgType_TwnhsE"] {
        assert_eq!(column(&schema, values, name), 0.0, "{}", name);
    }

    let prompts = generator.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].ends_with("USER PROMPT:\nSingle family home on a 12000 sq ft lot"));
}

#[tokio::test]
async fn test_invalid_category_scenario() {
    let schema = schema();
    let extractor = Extractor::new(Arc::new(MockGenerator::replying(r#"{"MSZoning": "XX"}"#)), schema);

    let clean = normalize(&extractor.extract("zoned XX").await);
    assert_eq!(clean.ms_zoning, MsZoning::ResidentialLow);
    assert_eq!(clean, CleanRecord::default());
}

#[tokio::test]
async fn test_unparseable_reply_encodes_as_defaults() {
    let schema = schema();
    let extractor = Extractor::new(
        Arc::new(MockGenerator::replying("I could not find any house features, sorry.")),
        schema.clone(),
    );

    let extraction = extractor.extract("hello").await;
    assert!(matches!(extraction, Extraction::Unparseable(_)));

    let clean = normalize(&extraction);
    assert_eq!(clean, CleanRecord::default());
    assert_eq!(encode(&schema, &clean), encode(&schema, schema.defaults()));
}

#[tokio::test]
async fn test_failed_call_degrades_to_defaults() {
    let generator = Arc::new(MockGenerator::failing("connection reset"));
    let pipeline = PricePipeline::new(schema(), generator.clone(), constant_ensemble(&[200_000.0]));

    let estimate = pipeline.estimate("anything").await.unwrap();
    assert_eq!(estimate.extraction, ExtractionOutcome::Unparseable);
    assert_eq!(estimate.features, CleanRecord::default());
    assert_eq!(estimate.price, 200_000.0);
    assert_eq!(generator.call_count(), 1);
}

#[tokio::test]
async fn test_ensemble_mean_scenario() {
    let pipeline = PricePipeline::new(
        schema(),
        Arc::new(MockGenerator::new()),
        constant_ensemble(&[100.0, 110.0, 120.0]),
    );

    let estimate = pipeline.estimate("a house").await.unwrap();
    assert_eq!(estimate.price, 110.0);
    assert_eq!(estimate.rounded_price(), 110);
}

#[tokio::test]
async fn test_model_failure_fails_estimate() {
    let members: Vec<Arc<dyn RegressionModel>> = vec![
        Arc::new(ConstantModel::new("lr", 100.0)),
        Arc::new(FailingModel::new("lasso")),
    ];
    let pipeline = PricePipeline::new(
        schema(),
        Arc::new(MockGenerator::new()),
        Arc::new(EnsemblePredictor::new(members).unwrap()),
    );

    let err = pipeline.estimate("a house").await.unwrap_err();
    assert!(matches!(err, PricingError::Model { ref model, .. } if model == "lasso"));
}

#[tokio::test]
async fn test_linear_models_see_encoded_columns() {
    let schema = schema();

    // Price = 10 * LotArea + 5000 if zoned FV
    let mut coefficients = vec![0.0; schema.width()];
    coefficients[schema.column_index("LotArea").unwrap()] = 10.0;
    coefficients[schema.column_index("MSZoning_FV").unwrap()] = 5000.0;
    let members: Vec<Arc<dyn RegressionModel>> =
        vec![Arc::new(LinearModel::new("lr", 1000.0, coefficients))];
    let ensemble = Arc::new(EnsemblePredictor::new(members).unwrap());

    let generator = Arc::new(
        MockGenerator::new()
            .with_reply(MockReply::Text(r#"{"LotArea": "8000", "MSZoning": "FV"}"#.into()))
            .with_reply(MockReply::Text(r#"{"LotArea": 8000, "MSZoning": "fv"}"#.into())),
    );
    let pipeline = PricePipeline::new(schema, generator, ensemble);

    let zoned_fv = pipeline.estimate("first").await.unwrap();
    assert_eq!(zoned_fv.price, 1000.0 + 80_000.0 + 5000.0);

    // Lowercase label is not a match; falls back to RL.
    let fallback = pipeline.estimate("second").await.unwrap();
    assert_eq!(fallback.features.ms_zoning, MsZoning::ResidentialLow);
    assert_eq!(fallback.price, 1000.0 + 80_000.0);
}
