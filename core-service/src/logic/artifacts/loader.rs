//! Artifact loader - reads and validates the JSON artifacts under a data
//! directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use super::manifest::checksum;
use super::Artifacts;
use crate::constants::{
    DEFAULT_COLUMNS_FILE, DEFAULT_DATASET_FILE, DEFAULT_DEPARTMENTS_FILE, DEFAULT_ENCODER_FILE,
    DEFAULT_FACULTY_FILE, DEFAULT_MODEL_FILE,
};
use crate::logic::dataset::SymptomDataset;
use crate::logic::error::LoadError;
use crate::logic::features::FeatureSchema;
use crate::logic::model::{LabelEncoderFile, LabelSpace, RandomForest};
use crate::logic::routing::{DiseaseDepartmentRow, DiseaseDepartmentTable, DoctorRecord, DoctorRoster};

/// Where each artifact lives
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub data_dir: PathBuf,
    pub model_file: String,
    pub encoder_file: String,
    pub columns_file: String,
    pub departments_file: String,
    pub faculty_file: String,
    /// Raw dataset for the last-resort fallback; `None` disables it
    pub dataset_file: Option<String>,
}

impl ArtifactPaths {
    /// Default file names under `data_dir`
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            model_file: DEFAULT_MODEL_FILE.to_string(),
            encoder_file: DEFAULT_ENCODER_FILE.to_string(),
            columns_file: DEFAULT_COLUMNS_FILE.to_string(),
            departments_file: DEFAULT_DEPARTMENTS_FILE.to_string(),
            faculty_file: DEFAULT_FACULTY_FILE.to_string(),
            dataset_file: Some(DEFAULT_DATASET_FILE.to_string()),
        }
    }

    pub fn resolve(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    /// Paths that must exist before anything is parsed
    fn required(&self) -> [PathBuf; 5] {
        [
            self.resolve(&self.model_file),
            self.resolve(&self.encoder_file),
            self.resolve(&self.columns_file),
            self.resolve(&self.departments_file),
            self.resolve(&self.faculty_file),
        ]
    }
}

pub fn load(paths: &ArtifactPaths) -> Result<Artifacts, LoadError> {
    log::info!("Loading datasets and model from {}", paths.data_dir.display());

    for path in paths.required() {
        if !path.exists() {
            log::error!("Required artifact not found at {}", path.display());
            return Err(LoadError::Missing(path));
        }
    }

    let model_path = paths.resolve(&paths.model_file);
    let model_bytes = read(&model_path)?;
    let forest: RandomForest = parse(&model_path, &model_bytes)?;
    log::info!(
        "Model loaded: {} estimators, {} classes",
        forest.estimators.len(),
        forest.n_classes
    );

    let encoder_path = paths.resolve(&paths.encoder_file);
    let encoder: LabelEncoderFile = parse(&encoder_path, &read(&encoder_path)?)?;
    let labels = LabelSpace::try_from(encoder)?;
    log::info!("Label encoder loaded with {} classes", labels.len());

    let columns_path = paths.resolve(&paths.columns_file);
    let columns: Vec<String> = parse(&columns_path, &read(&columns_path)?)?;
    let schema = FeatureSchema::new(columns)?;
    let layout = schema.info();
    log::info!(
        "Loaded {} symptom columns (layout {:08x})",
        layout.feature_count,
        layout.hash
    );

    let departments_path = paths.resolve(&paths.departments_file);
    let rows: Vec<DiseaseDepartmentRow> = parse(&departments_path, &read(&departments_path)?)?;
    let departments = DiseaseDepartmentTable::from_rows(rows);
    log::info!("Loaded {} disease mappings", departments.len());

    let faculty_path = paths.resolve(&paths.faculty_file);
    let doctors: Vec<DoctorRecord> = parse(&faculty_path, &read(&faculty_path)?)?;
    let roster = DoctorRoster::new(doctors);
    log::info!("Loaded {} doctors", roster.len());

    let artifacts = Artifacts::new(schema, labels, Box::new(forest), departments, roster)?
        .with_model_checksum(checksum(&model_bytes))
        .with_dataset(load_dataset(paths));

    log::info!("Model and data loaded successfully!");
    log::info!(
        "Sample of classes: {:?}",
        &artifacts.labels().classes()[..artifacts.labels().len().min(5)]
    );
    Ok(artifacts)
}

/// The fallback dataset is optional: absence or a bad file only disables
/// the symptom-matching fallback.
fn load_dataset(paths: &ArtifactPaths) -> Option<SymptomDataset> {
    let path = paths.resolve(paths.dataset_file.as_deref()?);
    if !path.exists() {
        log::warn!(
            "Symptom dataset not found at {}, symptom matching fallback disabled",
            path.display()
        );
        return None;
    }

    match SymptomDataset::load(&path) {
        Ok(dataset) => Some(dataset),
        Err(e) => {
            log::error!("Symptom matching fallback disabled: {}", e);
            None
        }
    }
}

fn read(path: &Path) -> Result<Vec<u8>, LoadError> {
    fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse<T: DeserializeOwned>(path: &Path, bytes: &[u8]) -> Result<T, LoadError> {
    serde_json::from_slice(bytes).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
