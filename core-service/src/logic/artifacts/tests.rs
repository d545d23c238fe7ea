//! Artifact Store Tests
//!
//! Loads artifacts from a temporary data directory and runs full
//! recommendations against them.

#[cfg(test)]
mod loader_tests {
    use std::fs;
    use std::path::Path;

    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    use crate::constants::{DEFAULT_DEPARTMENT, DEFAULT_DOCTOR_NAME};
    use crate::logic::artifacts::{ArtifactPaths, Artifacts};
    use crate::logic::error::LoadError;
    use crate::logic::model::PredictionMethod;
    use crate::logic::pipeline::recommend;

    // ------------------------------------------------------------------
    // Fixtures
    // ------------------------------------------------------------------

    /// One tree: high_fever -> flu, otherwise skin_rash -> psoriasis,
    /// otherwise measles.
    const MODEL: &str = r#"{
        "n_features_in": 3,
        "n_classes": 3,
        "estimators": [{
            "classes": [0, 1, 2],
            "children_left":  [1, 3, -1, -1, -1],
            "children_right": [2, 4, -1, -1, -1],
            "feature":   [0, 2, -2, -2, -2],
            "threshold": [0.5, 0.5, -2.0, -2.0, -2.0],
            "value": [[1, 1, 1], [0, 1, 1], [4, 0, 0], [0, 3, 0], [0, 0, 2]]
        }]
    }"#;

    const ENCODER: &str = r#"{"classes": ["flu", "measles", "psoriasis"]}"#;

    const COLUMNS: &str = r#"["high_fever", "dry_cough", "skin_rash"]"#;

    const DEPARTMENTS: &str = r#"[
        {"Diseases": "Flu", "Department": "Medicine"},
        {"Diseases": "Psoriasis ", "Department": "Dermatology"},
        {"Diseases": "Measles", "Department": "Pediatrics"}
    ]"#;

    const FACULTY: &str = r#"[
        {"Name": "Dr. A", "Designation": "Professor", "Department": "Medicine"},
        {"Name": "Dr. B", "Designation": "Lecturer", "Department": " Medicine)"},
        {"Name": "Dr. C", "Designation": "Consultant", "Department": "Medicine"},
        {"Name": "Dr. D", "Designation": "Registrar", "Department": "Medicine"},
        {"Name": "Dr. E", "Designation": "Professor", "Department": "Dermatology)"}
    ]"#;

    const DATASET: &str = r#"["diseases", "high fever", "itchy skin"]
["flu", 1, 0]
["psoriasis", 0, 1]
"#;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    fn data_dir() -> (TempDir, ArtifactPaths) {
        let dir = TempDir::new().unwrap();
        let paths = ArtifactPaths::new(dir.path());

        write(dir.path(), &paths.model_file, MODEL);
        write(dir.path(), &paths.encoder_file, ENCODER);
        write(dir.path(), &paths.columns_file, COLUMNS);
        write(dir.path(), &paths.departments_file, DEPARTMENTS);
        write(dir.path(), &paths.faculty_file, FACULTY);
        write(dir.path(), paths.dataset_file.as_deref().unwrap(), DATASET);

        (dir, paths)
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    #[test]
    fn test_load_reports_status() {
        let (_dir, paths) = data_dir();
        let artifacts = Artifacts::load(&paths).unwrap();
        let status = artifacts.status();

        assert_eq!(status.symptom_count, 3);
        assert_eq!(status.classes_count, 3);
        assert_eq!(status.model_estimators, 1);
        assert_eq!(status.sample_symptoms, vec!["high_fever", "dry_cough", "skin_rash"]);
        assert_eq!(status.layout_hash.len(), 8);
        assert_eq!(status.model_checksum.as_ref().map(String::len), Some(64));
        assert!(status.fallback_dataset);

        assert_eq!(artifacts.departments().len(), 3);
        assert_eq!(artifacts.roster().len(), 5);
    }

    #[test]
    fn test_missing_required_file_is_fatal() {
        let (dir, paths) = data_dir();
        fs::remove_file(dir.path().join(&paths.faculty_file)).unwrap();

        match Artifacts::load(&paths) {
            Err(LoadError::Missing(path)) => assert!(path.ends_with("faculty.json")),
            other => panic!("expected missing artifact, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_ensemble_is_fatal() {
        let (dir, paths) = data_dir();
        write(dir.path(), &paths.model_file, r#"{"n_classes": 3, "estimators": []}"#);

        assert!(matches!(Artifacts::load(&paths), Err(LoadError::EmptyEnsemble)));
    }

    #[test]
    fn test_malformed_encoder_is_parse_error() {
        let (dir, paths) = data_dir();
        write(dir.path(), &paths.encoder_file, "{\"classes\": [");

        match Artifacts::load(&paths) {
            Err(LoadError::Parse { path, .. }) => assert!(path.ends_with("label_encoder.json")),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_feature_count_mismatch_still_loads() {
        let (dir, paths) = data_dir();
        write(
            dir.path(),
            &paths.columns_file,
            r#"["high_fever", "dry_cough", "skin_rash", "headache"]"#,
        );

        let artifacts = Artifacts::load(&paths).unwrap();
        assert_eq!(artifacts.status().symptom_count, 4);
    }

    #[test]
    fn test_dataset_is_optional() {
        let (dir, paths) = data_dir();
        fs::remove_file(dir.path().join(paths.dataset_file.as_deref().unwrap())).unwrap();
        assert!(!Artifacts::load(&paths).unwrap().status().fallback_dataset);

        let mut disabled = paths.clone();
        disabled.dataset_file = None;
        assert!(Artifacts::load(&disabled).unwrap().dataset().is_none());
    }

    #[test]
    fn test_corrupt_dataset_only_disables_fallback() {
        let (dir, paths) = data_dir();
        write(dir.path(), paths.dataset_file.as_deref().unwrap(), "[\"fever\"]\n[1]\n");

        let artifacts = Artifacts::load(&paths).unwrap();
        assert!(artifacts.dataset().is_none());
    }

    // ------------------------------------------------------------------
    // End to end
    // ------------------------------------------------------------------

    #[test]
    fn test_recommend_fever_routes_to_medicine() {
        let (_dir, paths) = data_dir();
        let artifacts = Artifacts::load(&paths).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let rec = recommend(&artifacts, "Fever, cough", 3, &mut rng);
        assert_eq!(rec.predicted_disease, "flu");
        assert_eq!(rec.department, "Medicine");
        assert_eq!(rec.doctors.len(), 3);
        assert!(rec.doctors.iter().all(|d| d.department == "Medicine"));
        assert_eq!(rec.debug_info.prediction_method, PredictionMethod::PredictProba);
        assert_eq!(rec.debug_info.nonzero_features, 2);
    }

    #[test]
    fn test_recommend_returns_fewer_doctors_when_department_is_small() {
        let (_dir, paths) = data_dir();
        let artifacts = Artifacts::load(&paths).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let rec = recommend(&artifacts, "rash", 3, &mut rng);
        assert_eq!(rec.predicted_disease, "psoriasis");
        assert_eq!(rec.department, "Dermatology");
        assert_eq!(rec.doctors.len(), 1);
        assert_eq!(rec.doctors[0].name, "Dr. E");
    }

    #[test]
    fn test_recommend_without_doctors_uses_general_physician() {
        let (_dir, paths) = data_dir();
        let artifacts = Artifacts::load(&paths).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let rec = recommend(&artifacts, "vertigo", 3, &mut rng);
        assert_eq!(rec.predicted_disease, "measles");
        assert_eq!(rec.department, "Pediatrics");
        assert_eq!(rec.doctors.len(), 1);
        assert_eq!(rec.doctors[0].name, DEFAULT_DOCTOR_NAME);
        assert_eq!(rec.doctors[0].department, DEFAULT_DEPARTMENT);
    }

    #[test]
    fn test_recommend_unmapped_disease_defaults_to_medicine() {
        let (dir, paths) = data_dir();
        write(dir.path(), &paths.departments_file, "[]");
        let artifacts = Artifacts::load(&paths).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let rec = recommend(&artifacts, "rash", 2, &mut rng);
        assert_eq!(rec.department, DEFAULT_DEPARTMENT);
        assert_eq!(rec.doctors.len(), 2);
    }

    #[test]
    fn test_seeded_recommendations_are_reproducible() {
        let (_dir, paths) = data_dir();
        let artifacts = Artifacts::load(&paths).unwrap();

        let first = recommend(&artifacts, "fever", 2, &mut StdRng::seed_from_u64(42));
        let second = recommend(&artifacts, "fever", 2, &mut StdRng::seed_from_u64(42));
        assert_eq!(first.doctors, second.doctors);
    }

    #[test]
    fn test_drifted_model_falls_back_to_dataset() {
        let (dir, paths) = data_dir();
        // Leaf points at a code the encoder does not know
        write(
            dir.path(),
            &paths.model_file,
            r#"{
                "n_features_in": 3,
                "n_classes": 3,
                "estimators": [{
                    "classes": [7],
                    "children_left": [-1],
                    "children_right": [-1],
                    "feature": [-2],
                    "threshold": [-2.0],
                    "value": [[1]]
                }]
            }"#,
        );
        let artifacts = Artifacts::load(&paths).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        let rec = recommend(&artifacts, "itchy", 3, &mut rng);
        assert_eq!(rec.predicted_disease, "psoriasis");
        assert_eq!(rec.department, "Dermatology");
        assert_eq!(
            rec.debug_info.prediction_method,
            PredictionMethod::SymptomMatchingFallback
        );
    }
}
