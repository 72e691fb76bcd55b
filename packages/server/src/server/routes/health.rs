use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HomeResponse {
    message: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    models: Vec<String>,
    features: usize,
}

/// Root endpoint
pub async fn home_handler() -> Json<HomeResponse> {
    Json(HomeResponse {
        message: "House Price Prediction API is running",
    })
}

/// Health check endpoint
///
/// Models are loaded before the listener starts, so a running server always
/// has a complete ensemble.
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let ensemble = state.pipeline.ensemble();

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            models: ensemble
                .member_names()
                .into_iter()
                .map(String::from)
                .collect(),
            features: state.pipeline.schema().width(),
        }),
    )
}
