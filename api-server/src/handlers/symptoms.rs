//! Symptom schema listing

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{AppResult, AppState};

#[derive(Debug, Serialize)]
pub struct SymptomsResponse {
    pub symptoms: Vec<String>,
}

/// Every schema column, in model order
pub async fn list(State(state): State<AppState>) -> AppResult<Json<SymptomsResponse>> {
    let artifacts = state.loaded()?;

    Ok(Json(SymptomsResponse {
        symptoms: artifacts.schema().columns().to_vec(),
    }))
}
