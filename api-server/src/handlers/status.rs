//! Readiness snapshot served at the root path

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub message: &'static str,
    pub model_loaded: bool,
    pub symptom_count: usize,
    pub classes_count: usize,
    pub model_estimators: usize,
    pub sample_symptoms: Vec<String>,
    pub fallback_dataset: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_checksum: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<DateTime<Utc>>,
}

pub async fn index(State(state): State<AppState>) -> Json<StatusResponse> {
    let message = "Doctor Recommendation API";

    let response = match state.artifacts.as_deref() {
        Some(artifacts) => {
            let status = artifacts.status();
            StatusResponse {
                message,
                model_loaded: true,
                symptom_count: status.symptom_count,
                classes_count: status.classes_count,
                model_estimators: status.model_estimators,
                sample_symptoms: status.sample_symptoms,
                fallback_dataset: status.fallback_dataset,
                layout_hash: Some(status.layout_hash),
                model_checksum: status.model_checksum,
                loaded_at: Some(status.loaded_at),
            }
        }
        None => StatusResponse {
            message,
            model_loaded: false,
            symptom_count: 0,
            classes_count: 0,
            model_estimators: 0,
            sample_symptoms: Vec::new(),
            fallback_dataset: false,
            layout_hash: None,
            model_checksum: None,
            loaded_at: None,
        },
    };

    Json(response)
}
