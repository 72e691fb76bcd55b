use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use house_pricing::{CleanRecord, ExtractionOutcome};
use serde::{Deserialize, Serialize};

use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub predicted_sale_price: i64,
    pub features: CleanRecord,
    pub extraction: ExtractionOutcome,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Price prediction endpoint
///
/// Input-data problems never fail the request; they produce a prediction
/// from default features. Only model failures return 500.
pub async fn predict_handler(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Response {
    let prompt = match payload {
        Ok(Json(PredictRequest {
            prompt: Some(prompt),
        })) => prompt,
        Ok(_) => return error_response(StatusCode::BAD_REQUEST, "Missing 'prompt' in request body"),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected predict request body");
            return error_response(StatusCode::BAD_REQUEST, "Missing 'prompt' in request body");
        }
    };

    match state.pipeline.estimate(&prompt).await {
        Ok(estimate) => (
            StatusCode::OK,
            Json(PredictResponse {
                predicted_sale_price: estimate.rounded_price(),
                features: estimate.features,
                extraction: estimate.extraction,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Prediction failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
