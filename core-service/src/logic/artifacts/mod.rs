//! Artifact Store - everything the pipeline reads at serving time
//!
//! `Artifacts` is built once at startup, never mutated afterwards, and
//! shared by reference across requests. Dropping it releases the model.

pub mod loader;
pub mod manifest;

#[cfg(test)]
mod tests;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::SAMPLE_SYMPTOM_COUNT;
use crate::logic::dataset::SymptomDataset;
use crate::logic::error::LoadError;
use crate::logic::features::{FeatureSchema, FeatureVector};
use crate::logic::model::{Ensemble, EnsemblePredictor, LabelSpace};
use crate::logic::routing::{DiseaseDepartmentTable, DoctorRoster};

pub use loader::ArtifactPaths;
pub use manifest::ArtifactManifest;

/// Readiness snapshot for status endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactStatus {
    pub symptom_count: usize,
    pub classes_count: usize,
    pub model_estimators: usize,
    pub sample_symptoms: Vec<String>,
    pub layout_hash: String,
    pub model_checksum: Option<String>,
    pub loaded_at: DateTime<Utc>,
    pub fallback_dataset: bool,
}

pub struct Artifacts {
    schema: FeatureSchema,
    labels: LabelSpace,
    ensemble: Box<dyn Ensemble>,
    departments: DiseaseDepartmentTable,
    roster: DoctorRoster,
    dataset: Option<SymptomDataset>,
    manifest: ArtifactManifest,
}

impl Artifacts {
    /// Assemble artifacts, rejecting an empty ensemble.
    ///
    /// Model/schema/encoder disagreements are only logged: the prediction
    /// cascade is what copes with them at request time.
    pub fn new(
        schema: FeatureSchema,
        labels: LabelSpace,
        ensemble: Box<dyn Ensemble>,
        departments: DiseaseDepartmentTable,
        roster: DoctorRoster,
    ) -> Result<Self, LoadError> {
        if ensemble.estimator_count() == 0 {
            log::error!("Model has no estimators or is improperly structured");
            return Err(LoadError::EmptyEnsemble);
        }

        check_compatibility(&schema, &labels, ensemble.as_ref());
        smoke_test(&schema, ensemble.as_ref());

        let manifest = ArtifactManifest::new(schema.layout_hash());
        Ok(Self {
            schema,
            labels,
            ensemble,
            departments,
            roster,
            dataset: None,
            manifest,
        })
    }

    /// Attach the raw dataset used by the last-resort fallback
    pub fn with_dataset(mut self, dataset: Option<SymptomDataset>) -> Self {
        self.dataset = dataset;
        self
    }

    pub fn with_model_checksum(mut self, checksum: String) -> Self {
        self.manifest.model_checksum = Some(checksum);
        self
    }

    /// Load every artifact from disk
    pub fn load(paths: &ArtifactPaths) -> Result<Self, LoadError> {
        loader::load(paths)
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn labels(&self) -> &LabelSpace {
        &self.labels
    }

    pub fn ensemble(&self) -> &dyn Ensemble {
        self.ensemble.as_ref()
    }

    pub fn departments(&self) -> &DiseaseDepartmentTable {
        &self.departments
    }

    pub fn roster(&self) -> &DoctorRoster {
        &self.roster
    }

    pub fn dataset(&self) -> Option<&SymptomDataset> {
        self.dataset.as_ref()
    }

    pub fn manifest(&self) -> &ArtifactManifest {
        &self.manifest
    }

    /// Cascade predictor borrowing these artifacts
    pub fn predictor(&self) -> EnsemblePredictor<'_> {
        EnsemblePredictor::new(self.ensemble(), &self.labels).with_dataset(self.dataset())
    }

    pub fn status(&self) -> ArtifactStatus {
        ArtifactStatus {
            symptom_count: self.schema.len(),
            classes_count: self.labels.len(),
            model_estimators: self.ensemble.estimator_count(),
            sample_symptoms: self.schema.sample(SAMPLE_SYMPTOM_COUNT).to_vec(),
            layout_hash: self.manifest.layout_hash.clone(),
            model_checksum: self.manifest.model_checksum.clone(),
            loaded_at: self.manifest.loaded_at,
            fallback_dataset: self.dataset.is_some(),
        }
    }
}

impl std::fmt::Debug for Artifacts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Artifacts")
            .field("symptom_count", &self.schema.len())
            .field("classes_count", &self.labels.len())
            .field("estimators", &self.ensemble.estimator_count())
            .field("departments", &self.departments.len())
            .field("doctors", &self.roster.len())
            .field("fallback_dataset", &self.dataset.is_some())
            .field("manifest", &self.manifest)
            .finish()
    }
}

fn check_compatibility(schema: &FeatureSchema, labels: &LabelSpace, ensemble: &dyn Ensemble) {
    match ensemble.n_features_in().map(|n| schema.check_feature_count(n)) {
        Some(Ok(())) => log::info!("Feature count match confirmed: {} features", schema.len()),
        Some(Err(mismatch)) => log::warn!("{}", mismatch),
        None => {}
    }

    if let Some(n_classes) = ensemble.n_classes() {
        if n_classes != labels.len() {
            log::warn!(
                "Model declares {} classes but the label encoder has {}",
                n_classes,
                labels.len()
            );
        }
    }
}

/// Predict an all-zero vector with the first estimator. Failure is logged,
/// never fatal.
fn smoke_test(schema: &FeatureSchema, ensemble: &dyn Ensemble) {
    let Some(enumerable) = ensemble.as_enumerable() else {
        return;
    };
    let estimators = enumerable.estimators();
    let Some(first) = estimators.first() else {
        return;
    };

    match first.predict_code(&FeatureVector::zeros(schema)) {
        Ok(code) => log::info!("Test prediction from first tree: {}", code),
        Err(e) => log::error!("Test prediction failed: {}", e),
    }
}
