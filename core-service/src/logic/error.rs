//! Error types for artifact loading and prediction strategies.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors raised while loading serving artifacts.
///
/// Any of these aborts startup; nothing here is retried.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("required artifact not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("model has no estimators or is improperly structured")]
    EmptyEnsemble,

    #[error("feature schema is empty")]
    EmptySchema,

    #[error("duplicate feature column: {0}")]
    DuplicateColumn(String),

    #[error("label encoder has no classes")]
    EmptyLabelSpace,

    #[error("duplicate label in encoder: {0}")]
    DuplicateLabel(String),

    #[error("invalid symptom dataset (line {line}): {reason}")]
    InvalidDataset { line: usize, reason: String },
}

/// Errors local to a single prediction strategy.
///
/// The cascade logs these and moves on; they never reach the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StrategyError {
    #[error("ensemble does not support {0}")]
    CapabilityUnavailable(&'static str),

    #[error("feature index {index} out of range for vector of length {len}")]
    FeatureOutOfRange { index: usize, len: usize },

    #[error("malformed tree: {0}")]
    MalformedTree(String),

    #[error("class code {code} outside model class space of {n_classes}")]
    ClassSpaceMismatch { code: usize, n_classes: usize },

    #[error("label code {code} not in label space of {size} classes")]
    UnknownLabelCode { code: usize, size: usize },

    #[error("no predictions made by any estimator")]
    NoPredictions,

    #[error("estimator {index} failed: {reason}")]
    EstimatorFailed { index: usize, reason: String },

    #[error("raw symptom dataset not available")]
    DatasetUnavailable,

    #[error("no dataset rows matched the input symptoms")]
    NoMatches,
}
