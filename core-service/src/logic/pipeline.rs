//! Recommendation pipeline: symptoms -> disease -> department -> doctors.
//!
//! Callers reject blank input before getting here.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::logic::artifacts::Artifacts;
use crate::logic::features::vectorize;
use crate::logic::model::PredictionDebugInfo;
use crate::logic::routing::DoctorRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub predicted_disease: String,
    pub department: String,
    pub doctors: Vec<DoctorRecord>,
    pub debug_info: PredictionDebugInfo,
}

/// Run the full pipeline for one request
pub fn recommend<R>(artifacts: &Artifacts, symptoms: &str, max_doctors: usize, rng: &mut R) -> Recommendation
where
    R: Rng + ?Sized,
{
    log::info!("Input symptoms: {}", symptoms);

    let input = vectorize(symptoms, artifacts.schema());
    log::info!("Processed symptoms: {:?}", input.tokens);

    let prediction = artifacts.predictor().predict(symptoms, &input);
    if prediction.is_unclassified() {
        log::warn!("No strategy could classify '{}'", symptoms);
    }

    log::info!("Finding doctors for disease: {}", prediction.disease);
    let department = artifacts.departments().resolve(&prediction.disease).to_string();

    let mut doctors = artifacts.roster().select(&department, max_doctors, rng);
    if doctors.is_empty() {
        log::warn!(
            "No doctors found for disease '{}', using defaults",
            prediction.disease
        );
        doctors.push(DoctorRecord::general_physician());
    }

    Recommendation {
        predicted_disease: prediction.disease,
        department,
        doctors,
        debug_info: prediction.debug_info,
    }
}
