//! Per-request prediction diagnostics, returned with every recommendation.

use serde::{Deserialize, Serialize};

/// Which cascade step produced the label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionMethod {
    PredictProba,
    Predict,
    ManualVoting,
    TreeByTree,
    SymptomMatchingFallback,
    /// Every step failed; the label is the unclassified sentinel
    Unclassified,
}

impl PredictionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PredictProba => "predict_proba",
            Self::Predict => "predict",
            Self::ManualVoting => "manual_voting",
            Self::TreeByTree => "tree_by_tree",
            Self::SymptomMatchingFallback => "symptom_matching_fallback",
            Self::Unclassified => "unclassified",
        }
    }
}

impl std::fmt::Display for PredictionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One cascade step and how it went
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyAttempt {
    pub method: PredictionMethod,
    pub succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionDebugInfo {
    pub symptoms_input: String,
    pub symptoms_processed: Vec<String>,
    pub symptoms_matched_count: usize,
    pub nonzero_features: usize,
    pub vector_length: usize,
    pub classes_count: usize,
    pub estimators_count: usize,
    pub prediction_method: PredictionMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction_confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub votes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_trees: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub successful_trees: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_count: Option<usize>,
    pub attempts: Vec<StrategyAttempt>,
}
