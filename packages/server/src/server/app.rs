//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use gemini_client::GeminiClient;
use house_pricing::{load_ensemble, FeatureSchema, PricePipeline};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::server::routes::{health_handler, home_handler, predict_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<PricePipeline>,
}

impl AppState {
    pub fn new(pipeline: PricePipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

/// Build the pricing pipeline from configuration.
///
/// Loads every model artifact and builds the Gemini client. Any failure
/// here is fatal: the service must not accept requests without models or
/// credentials.
pub fn build_pipeline(config: &Config) -> Result<PricePipeline> {
    let schema = Arc::new(FeatureSchema::house_prices());

    let ensemble = load_ensemble(&config.models_dir, &config.model_files, &schema)
        .context("Failed to load regression models")?;
    tracing::info!(models = ?ensemble.member_names(), "Ensemble ready");

    let mut gemini = GeminiClient::new(config.gemini_api_key.clone())
        .with_model(config.gemini_model.clone())
        .with_timeout(Duration::from_secs(config.llm_timeout_secs))
        .context("Failed to build Gemini client")?;
    if let Some(url) = &config.gemini_base_url {
        gemini = gemini.with_base_url(url.clone());
    }

    Ok(PricePipeline::new(schema, Arc::new(gemini), Arc::new(ensemble)))
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    // CORS configuration - allow any origin
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/", get(home_handler))
        .route("/health", get(health_handler))
        .route("/predict", post(predict_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
