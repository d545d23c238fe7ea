//! Ensemble capabilities and the random forest implementation.
//!
//! A loaded ensemble may not support every way of asking for a prediction.
//! The cascade probes the three capabilities below instead of assuming them.

use serde::{Deserialize, Serialize};

use super::tree::DecisionTree;
use super::vote::argmax;
use crate::logic::error::StrategyError;
use crate::logic::features::FeatureVector;

// ============================================================================
// CAPABILITIES
// ============================================================================

/// A single member of an ensemble
pub trait Estimator: Send + Sync {
    fn predict_code(&self, features: &FeatureVector) -> Result<usize, StrategyError>;
}

/// Class membership probabilities across the full class space
pub trait ProbabilisticClassifier: Send + Sync {
    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>, StrategyError>;
}

/// One aggregated label code
pub trait DirectClassifier: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<usize, StrategyError>;
}

/// Per-estimator access for manual voting
pub trait EstimatorEnumerable: Send + Sync {
    fn estimators(&self) -> Vec<&dyn Estimator>;
}

/// A loaded ensemble classifier.
///
/// Capabilities default to absent; implementations opt in.
pub trait Ensemble: Send + Sync {
    /// Number of estimators; zero is rejected at load time
    fn estimator_count(&self) -> usize;

    /// Feature count the ensemble was fitted on, when known
    fn n_features_in(&self) -> Option<usize> {
        None
    }

    /// Size of the ensemble's class space, when known
    fn n_classes(&self) -> Option<usize> {
        None
    }

    fn as_probabilistic(&self) -> Option<&dyn ProbabilisticClassifier> {
        None
    }

    fn as_direct(&self) -> Option<&dyn DirectClassifier> {
        None
    }

    fn as_enumerable(&self) -> Option<&dyn EstimatorEnumerable> {
        None
    }
}

// ============================================================================
// RANDOM FOREST
// ============================================================================

fn default_supports_proba() -> bool {
    true
}

/// Random forest of flattened decision trees
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    #[serde(default)]
    pub n_features_in: Option<usize>,
    pub n_classes: usize,
    /// Models exported without probability output set this to false
    #[serde(default = "default_supports_proba")]
    pub supports_proba: bool,
    pub estimators: Vec<DecisionTree>,
}

impl RandomForest {
    /// Mean of the per-tree leaf distributions over `n_classes`.
    ///
    /// Fails when any tree fails or references a code outside the forest's
    /// class space, which happens when trees were fitted on drifting label
    /// sets.
    fn averaged_distribution(&self, features: &FeatureVector) -> Result<Vec<f64>, StrategyError> {
        if self.estimators.is_empty() {
            return Err(StrategyError::NoPredictions);
        }

        let mut proba = vec![0.0; self.n_classes];
        for tree in &self.estimators {
            for (code, p) in tree.predict_distribution(features)? {
                let slot = proba.get_mut(code).ok_or(StrategyError::ClassSpaceMismatch {
                    code,
                    n_classes: self.n_classes,
                })?;
                *slot += p;
            }
        }

        let trees = self.estimators.len() as f64;
        proba.iter_mut().for_each(|p| *p /= trees);
        Ok(proba)
    }
}

impl Estimator for DecisionTree {
    fn predict_code(&self, features: &FeatureVector) -> Result<usize, StrategyError> {
        DecisionTree::predict_code(self, features)
    }
}

impl ProbabilisticClassifier for RandomForest {
    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>, StrategyError> {
        self.averaged_distribution(features)
    }
}

impl DirectClassifier for RandomForest {
    fn predict(&self, features: &FeatureVector) -> Result<usize, StrategyError> {
        let proba = self.averaged_distribution(features)?;
        argmax(&proba).ok_or(StrategyError::NoPredictions)
    }
}

impl EstimatorEnumerable for RandomForest {
    fn estimators(&self) -> Vec<&dyn Estimator> {
        self.estimators.iter().map(|t| t as &dyn Estimator).collect()
    }
}

impl Ensemble for RandomForest {
    fn estimator_count(&self) -> usize {
        self.estimators.len()
    }

    fn n_features_in(&self) -> Option<usize> {
        self.n_features_in
    }

    fn n_classes(&self) -> Option<usize> {
        Some(self.n_classes)
    }

    fn as_probabilistic(&self) -> Option<&dyn ProbabilisticClassifier> {
        if self.supports_proba {
            Some(self)
        } else {
            None
        }
    }

    fn as_direct(&self) -> Option<&dyn DirectClassifier> {
        Some(self)
    }

    fn as_enumerable(&self) -> Option<&dyn EstimatorEnumerable> {
        Some(self)
    }
}
