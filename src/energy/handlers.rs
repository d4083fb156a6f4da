use axum::{
    extract::rejection::JsonRejection,
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use super::dto::{CalculateBmrRequest, EnergyEstimate, HealthResponse};
use super::services::calculate;
use crate::{
    errors::{AppError, AppResult},
    state::AppState,
};

pub fn energy_routes() -> Router<AppState> {
    Router::new()
        .route("/calculate-bmr", post(calculate_bmr))
        .route("/test", get(health))
}

#[instrument(skip(payload))]
pub async fn calculate_bmr(
    payload: Result<Json<CalculateBmrRequest>, JsonRejection>,
) -> AppResult<Json<EnergyEstimate>> {
    let Json(req) = payload.map_err(|e| {
        warn!(error = %e, "rejected bmr body");
        AppError::BadRequest(e.body_text())
    })?;

    match calculate(&req) {
        Ok(estimate) => {
            info!(bmr = estimate.bmr, tdee = estimate.tdee, "bmr calculated");
            Ok(Json(estimate))
        }
        Err(e) => {
            warn!(error = %e, "invalid bmr request");
            Err(e.into())
        }
    }
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "Nutrition Tracker API is working!".into(),
        timestamp: OffsetDateTime::now_utc(),
    })
}
