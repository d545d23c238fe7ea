//! Recommendation handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use recommender_core::{recommend, Recommendation};
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{AppResult, AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct RecommendRequest {
    /// Comma-separated free text
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub symptoms: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("No symptoms provided".into());
        return Err(err);
    }
    Ok(())
}

/// Symptoms -> disease -> department -> doctors
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> AppResult<Json<Recommendation>> {
    let artifacts = state.loaded()?;

    let Json(req) = payload?;
    req.validate()?;
    let max_doctors = state.config.max_doctors;
    let request_id = Uuid::new_v4();

    tracing::debug!(%request_id, symptoms = %req.symptoms, "Recommendation requested");

    // Tree walks are CPU bound; keep them off the async workers
    let recommendation = tokio::task::spawn_blocking(move || {
        let mut rng = rand::thread_rng();
        recommend(&artifacts, &req.symptoms, max_doctors, &mut rng)
    })
    .await?;

    tracing::info!(
        %request_id,
        disease = %recommendation.predicted_disease,
        department = %recommendation.department,
        method = %recommendation.debug_info.prediction_method,
        doctors = recommendation.doctors.len(),
        "Recommendation ready"
    );

    Ok(Json(recommendation))
}
