//! Inference Engine - Ensemble prediction cascade
//!
//! Strategies are tried strictly in order and the first one that executes
//! without error wins. Results are not cross-checked between strategies,
//! only executability. When every strategy fails the request still gets an
//! answer: the unclassified sentinel label.

use super::debug::{PredictionDebugInfo, PredictionMethod, StrategyAttempt};
use super::forest::Ensemble;
use super::label::LabelSpace;
use super::vote::{argmax, majority};
use crate::constants::UNCLASSIFIED_DISEASE;
use crate::logic::dataset::SymptomDataset;
use crate::logic::error::StrategyError;
use crate::logic::features::{parse_symptoms, Vectorized};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Everything a strategy may consult
pub struct PredictionContext<'a> {
    /// Original request text
    pub symptoms: &'a str,
    pub input: &'a Vectorized,
    pub ensemble: &'a dyn Ensemble,
    pub labels: &'a LabelSpace,
    pub dataset: Option<&'a SymptomDataset>,
}

/// What a successful strategy reports
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrategyOutcome {
    pub disease: String,
    pub confidence: Option<f64>,
    pub votes: Option<usize>,
    pub total_trees: Option<usize>,
    pub successful_trees: Option<usize>,
    pub matched_count: Option<usize>,
}

impl StrategyOutcome {
    fn new(disease: impl Into<String>) -> Self {
        Self {
            disease: disease.into(),
            ..Default::default()
        }
    }
}

/// Uniform strategy contract
pub type Strategy = fn(&PredictionContext<'_>) -> Result<StrategyOutcome, StrategyError>;

/// Cascade order
pub const CASCADE: &[(PredictionMethod, Strategy)] = &[
    (PredictionMethod::PredictProba, predict_proba),
    (PredictionMethod::Predict, predict_direct),
    (PredictionMethod::ManualVoting, manual_voting),
    (PredictionMethod::TreeByTree, tree_by_tree),
    (PredictionMethod::SymptomMatchingFallback, symptom_matching),
];

/// Final label plus diagnostics
#[derive(Debug, Clone)]
pub struct Prediction {
    pub disease: String,
    pub debug_info: PredictionDebugInfo,
}

impl Prediction {
    /// True when no strategy produced a label
    pub fn is_unclassified(&self) -> bool {
        self.debug_info.prediction_method == PredictionMethod::Unclassified
    }
}

// ============================================================================
// PREDICTOR
// ============================================================================

/// Runs the cascade against borrowed, read-only artifacts
pub struct EnsemblePredictor<'a> {
    ensemble: &'a dyn Ensemble,
    labels: &'a LabelSpace,
    dataset: Option<&'a SymptomDataset>,
}

impl<'a> EnsemblePredictor<'a> {
    pub fn new(ensemble: &'a dyn Ensemble, labels: &'a LabelSpace) -> Self {
        Self {
            ensemble,
            labels,
            dataset: None,
        }
    }

    /// Enable the raw dataset fallback
    pub fn with_dataset(mut self, dataset: Option<&'a SymptomDataset>) -> Self {
        self.dataset = dataset;
        self
    }

    pub fn predict(&self, symptoms: &str, input: &Vectorized) -> Prediction {
        let ctx = PredictionContext {
            symptoms,
            input,
            ensemble: self.ensemble,
            labels: self.labels,
            dataset: self.dataset,
        };

        let mut debug_info = PredictionDebugInfo {
            symptoms_input: symptoms.to_string(),
            symptoms_processed: input.tokens.clone(),
            symptoms_matched_count: input.matched_tokens,
            nonzero_features: input.nonzero_features,
            vector_length: input.vector.len(),
            classes_count: self.labels.len(),
            estimators_count: self.ensemble.estimator_count(),
            prediction_method: PredictionMethod::Unclassified,
            prediction_confidence: None,
            votes: None,
            total_trees: None,
            successful_trees: None,
            matched_count: None,
            attempts: Vec::with_capacity(CASCADE.len()),
        };

        for (method, strategy) in CASCADE {
            log::info!("Attempting method: {}", method);

            match strategy(&ctx) {
                Ok(outcome) => {
                    log::info!("Method {} successful - predicted disease: {}", method, outcome.disease);
                    debug_info.attempts.push(StrategyAttempt {
                        method: *method,
                        succeeded: true,
                        error: None,
                    });
                    debug_info.prediction_method = *method;
                    debug_info.prediction_confidence = outcome.confidence;
                    debug_info.votes = outcome.votes;
                    debug_info.total_trees = outcome.total_trees;
                    debug_info.successful_trees = outcome.successful_trees;
                    debug_info.matched_count = outcome.matched_count;

                    return Prediction {
                        disease: outcome.disease,
                        debug_info,
                    };
                }
                Err(e) => {
                    log::warn!("Method {} failed: {}", method, e);
                    debug_info.attempts.push(StrategyAttempt {
                        method: *method,
                        succeeded: false,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        log::error!("All methods failed - returning generic response");
        Prediction {
            disease: UNCLASSIFIED_DISEASE.to_string(),
            debug_info,
        }
    }
}

// ============================================================================
// STRATEGIES
// ============================================================================

/// Argmax over the ensemble's class probabilities
fn predict_proba(ctx: &PredictionContext<'_>) -> Result<StrategyOutcome, StrategyError> {
    let model = ctx
        .ensemble
        .as_probabilistic()
        .ok_or(StrategyError::CapabilityUnavailable("predict_proba"))?;

    let proba = model.predict_proba(&ctx.input.vector)?;
    let code = argmax(&proba).ok_or(StrategyError::NoPredictions)?;
    let disease = ctx.labels.decode(code)?;

    Ok(StrategyOutcome {
        confidence: Some(proba[code]),
        ..StrategyOutcome::new(disease)
    })
}

/// The ensemble's own aggregated prediction
fn predict_direct(ctx: &PredictionContext<'_>) -> Result<StrategyOutcome, StrategyError> {
    let model = ctx
        .ensemble
        .as_direct()
        .ok_or(StrategyError::CapabilityUnavailable("predict"))?;

    let code = model.predict(&ctx.input.vector)?;
    Ok(StrategyOutcome::new(ctx.labels.decode(code)?))
}

/// Majority vote over every estimator; any failing estimator fails the vote
fn manual_voting(ctx: &PredictionContext<'_>) -> Result<StrategyOutcome, StrategyError> {
    let model = ctx
        .ensemble
        .as_enumerable()
        .ok_or(StrategyError::CapabilityUnavailable("per-estimator access"))?;

    let estimators = model.estimators();
    let codes = estimators
        .iter()
        .enumerate()
        .map(|(index, e)| {
            e.predict_code(&ctx.input.vector)
                .map_err(|err| StrategyError::EstimatorFailed {
                    index,
                    reason: err.to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let (code, votes) = majority(codes).ok_or(StrategyError::NoPredictions)?;
    let disease = ctx.labels.decode(code)?;
    log::info!("Manual voting picked code {} with {} votes", code, votes);

    Ok(StrategyOutcome {
        votes: Some(votes),
        total_trees: Some(estimators.len()),
        ..StrategyOutcome::new(disease)
    })
}

/// Majority vote over the estimators that still work
fn tree_by_tree(ctx: &PredictionContext<'_>) -> Result<StrategyOutcome, StrategyError> {
    let model = ctx
        .ensemble
        .as_enumerable()
        .ok_or(StrategyError::CapabilityUnavailable("per-estimator access"))?;

    let estimators = model.estimators();
    let mut predictions = Vec::with_capacity(estimators.len());
    for (index, estimator) in estimators.iter().enumerate() {
        match estimator.predict_code(&ctx.input.vector) {
            Ok(code) => predictions.push(code),
            Err(e) => log::warn!("Tree {} failed: {}", index, e),
        }
    }

    let successful = predictions.len();
    let (code, _) = majority(predictions).ok_or(StrategyError::NoPredictions)?;
    let disease = ctx.labels.decode(code)?;

    Ok(StrategyOutcome {
        successful_trees: Some(successful),
        ..StrategyOutcome::new(disease)
    })
}

/// Most frequent disease among raw dataset rows sharing a symptom
fn symptom_matching(ctx: &PredictionContext<'_>) -> Result<StrategyOutcome, StrategyError> {
    let dataset = ctx.dataset.ok_or(StrategyError::DatasetUnavailable)?;
    let tokens = parse_symptoms(ctx.symptoms);

    let found = dataset
        .most_common_match(&tokens)
        .ok_or(StrategyError::NoMatches)?;
    log::info!(
        "Found matching disease by symptom lookup: {} ({} matches)",
        found.disease,
        found.matched_count
    );

    Ok(StrategyOutcome {
        matched_count: Some(found.matched_count),
        ..StrategyOutcome::new(found.disease)
    })
}
