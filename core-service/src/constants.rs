//! Central Configuration Constants
//!
//! Single source of truth for defaults shared by the core and the server.

/// Department used when a disease has no mapping
pub const DEFAULT_DEPARTMENT: &str = "Medicine";

/// Sentinel label returned when every prediction strategy fails.
///
/// Never a genuine classification; compare against this constant (or check
/// for the `unclassified` prediction method) downstream.
pub const UNCLASSIFIED_DISEASE: &str = "General Health Issue";

/// Placeholder doctor when a department has nobody on the roster
pub const DEFAULT_DOCTOR_NAME: &str = "Dr. General Medicine";
pub const DEFAULT_DOCTOR_DESIGNATION: &str = "General Physician";

/// Doctors returned per recommendation
pub const DEFAULT_MAX_DOCTORS: usize = 3;

/// Columns shown in readiness snapshots
pub const SAMPLE_SYMPTOM_COUNT: usize = 5;

/// Label column in the raw symptom dataset
pub const DATASET_LABEL_COLUMN: &str = "diseases";

// ============================================
// Artifact file defaults
// ============================================

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_MODEL_FILE: &str = "forest_model.json";
pub const DEFAULT_ENCODER_FILE: &str = "label_encoder.json";
pub const DEFAULT_COLUMNS_FILE: &str = "symptom_columns.json";
pub const DEFAULT_DEPARTMENTS_FILE: &str = "disease_departments.json";
pub const DEFAULT_FACULTY_FILE: &str = "faculty.json";
pub const DEFAULT_DATASET_FILE: &str = "symptom_dataset.jsonl";
