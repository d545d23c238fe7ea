//! Model Module - Ensemble inference
//!
//! - `tree` / `forest` - flattened decision trees and the capability-probed
//!   ensemble interface
//! - `label` - label encoder
//! - `inference` - the strategy cascade
//! - `debug` - per-request diagnostics

pub mod debug;
pub mod forest;
pub mod inference;
pub mod label;
pub mod tree;
pub mod vote;


// Re-export common types
pub use debug::{PredictionDebugInfo, PredictionMethod, StrategyAttempt};
pub use forest::{
    DirectClassifier, Ensemble, Estimator, EstimatorEnumerable, ProbabilisticClassifier,
    RandomForest,
};
pub use inference::{EnsemblePredictor, Prediction};
pub use label::{LabelEncoderFile, LabelSpace};
pub use tree::DecisionTree;
