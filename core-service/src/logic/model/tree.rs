//! Decision tree in flattened node-array form.
//!
//! Node `i` is a leaf when `children_left[i] == -1`. Split nodes send a row
//! left when `x[feature[i]] <= threshold[i]`. Leaf weights in `value[i]`
//! are aligned to this tree's own `classes` list of label codes, which may
//! be a subset of the forest's class space.

use serde::{Deserialize, Serialize};

use crate::logic::error::StrategyError;
use crate::logic::features::FeatureVector;

const LEAF: i64 = -1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    /// Label codes this tree was fitted on
    pub classes: Vec<usize>,
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    /// Per-node class weights, aligned to `classes`
    pub value: Vec<Vec<f64>>,
}

impl DecisionTree {
    pub fn node_count(&self) -> usize {
        self.children_left.len()
    }

    /// Walk from the root to a leaf and return its class weights.
    pub fn leaf_weights(&self, features: &FeatureVector) -> Result<&[f64], StrategyError> {
        let nodes = self.node_count();
        if nodes == 0 {
            return Err(StrategyError::MalformedTree("tree has no nodes".to_string()));
        }
        if self.children_right.len() != nodes
            || self.feature.len() != nodes
            || self.threshold.len() != nodes
            || self.value.len() != nodes
        {
            return Err(StrategyError::MalformedTree(
                "node arrays have different lengths".to_string(),
            ));
        }

        let mut node = 0usize;
        // A valid path never visits more nodes than the tree holds
        for _ in 0..nodes {
            let left = self.children_left[node];
            if left == LEAF {
                let weights = &self.value[node];
                if weights.len() != self.classes.len() {
                    return Err(StrategyError::MalformedTree(format!(
                        "leaf {} has {} weights for {} classes",
                        node,
                        weights.len(),
                        self.classes.len()
                    )));
                }
                return Ok(weights);
            }

            let index = usize::try_from(self.feature[node]).map_err(|_| {
                StrategyError::MalformedTree(format!("split {} has negative feature index", node))
            })?;
            let value = features.get(index).ok_or(StrategyError::FeatureOutOfRange {
                index,
                len: features.len(),
            })?;

            let next = if f64::from(value) <= self.threshold[node] {
                left
            } else {
                self.children_right[node]
            };
            node = usize::try_from(next)
                .ok()
                .filter(|&n| n < nodes)
                .ok_or_else(|| {
                    StrategyError::MalformedTree(format!("node {} points to missing child {}", node, next))
                })?;
        }

        Err(StrategyError::MalformedTree("traversal did not reach a leaf".to_string()))
    }

    /// Normalized class distribution at the reached leaf, keyed by label code.
    pub fn predict_distribution(
        &self,
        features: &FeatureVector,
    ) -> Result<Vec<(usize, f64)>, StrategyError> {
        let weights = self.leaf_weights(features)?;
        let total: f64 = weights.iter().sum();
        if total.is_nan() || total <= 0.0 {
            return Err(StrategyError::MalformedTree("leaf has no weight".to_string()));
        }

        Ok(self
            .classes
            .iter()
            .zip(weights)
            .map(|(&code, &w)| (code, w / total))
            .collect())
    }

    /// Label code with the heaviest leaf weight (first wins on ties).
    pub fn predict_code(&self, features: &FeatureVector) -> Result<usize, StrategyError> {
        let weights = self.leaf_weights(features)?;
        let best = super::vote::argmax(weights)
            .ok_or_else(|| StrategyError::MalformedTree("leaf has no weights".to_string()))?;
        Ok(self.classes[best])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// x[0] <= 0.5 -> code 3, else code 7
    fn stump(feature: i64) -> DecisionTree {
        DecisionTree {
            classes: vec![3, 7],
            children_left: vec![1, -1, -1],
            children_right: vec![2, -1, -1],
            feature: vec![feature, -2, -2],
            threshold: vec![0.5, -2.0, -2.0],
            value: vec![vec![5.0, 5.0], vec![4.0, 1.0], vec![1.0, 3.0]],
        }
    }

    #[test]
    fn test_stump_routes_on_threshold() {
        let tree = stump(0);
        let off = FeatureVector::from_values(0, vec![0, 1]);
        let on = FeatureVector::from_values(0, vec![1, 0]);

        assert_eq!(tree.predict_code(&off).unwrap(), 3);
        assert_eq!(tree.predict_code(&on).unwrap(), 7);
    }

    #[test]
    fn test_distribution_is_normalized() {
        let tree = stump(0);
        let on = FeatureVector::from_values(0, vec![1]);
        let dist = tree.predict_distribution(&on).unwrap();
        assert_eq!(dist, vec![(3, 0.25), (7, 0.75)]);
    }

    #[test]
    fn test_feature_out_of_range_fails() {
        let tree = stump(4);
        let short = FeatureVector::from_values(0, vec![1, 0]);
        assert_eq!(
            tree.predict_code(&short),
            Err(StrategyError::FeatureOutOfRange { index: 4, len: 2 })
        );
    }

    #[test]
    fn test_cycle_is_detected() {
        let mut tree = stump(0);
        tree.children_left[0] = 0;
        let v = FeatureVector::from_values(0, vec![0]);
        assert!(matches!(tree.predict_code(&v), Err(StrategyError::MalformedTree(_))));
    }

    #[test]
    fn test_dangling_child_is_detected() {
        let mut tree = stump(0);
        tree.children_right[0] = 9;
        let v = FeatureVector::from_values(0, vec![1]);
        assert!(matches!(tree.predict_code(&v), Err(StrategyError::MalformedTree(_))));
    }

    #[test]
    fn test_leaf_weight_shape_mismatch_fails() {
        let mut tree = stump(0);
        tree.value[1] = vec![1.0];
        let v = FeatureVector::from_values(0, vec![0]);
        assert!(matches!(tree.predict_code(&v), Err(StrategyError::MalformedTree(_))));
    }
}
