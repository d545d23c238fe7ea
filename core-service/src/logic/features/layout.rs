//! Feature Layout - Symptom Column Schema
//!
//! The ordered column list comes from the artifact store and fixes vector
//! length and position semantics for the whole serving lifetime.
//!
//! ## Rules
//! 1. Column order is never changed after load
//! 2. Column names are unique
//! 3. Model and schema compatibility is checked by feature count and
//!    reported through the layout hash

use std::collections::HashSet;

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

use crate::logic::error::LoadError;

// ============================================================================
// FEATURE SCHEMA
// ============================================================================

/// Ordered symptom columns the model was trained on.
#[derive(Debug, Clone)]
pub struct FeatureSchema {
    columns: Vec<String>,
    /// Lowercased column names, same order as `columns`
    lowered: Vec<String>,
    layout_hash: u32,
}

impl FeatureSchema {
    /// Build a schema, rejecting empty or duplicated column lists.
    pub fn new(columns: Vec<String>) -> Result<Self, LoadError> {
        if columns.is_empty() {
            return Err(LoadError::EmptySchema);
        }

        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(LoadError::DuplicateColumn(column.clone()));
            }
        }

        let lowered = columns.iter().map(|c| c.to_lowercase()).collect();
        let layout_hash = compute_layout_hash(&columns);

        Ok(Self {
            columns,
            lowered,
            layout_hash,
        })
    }

    /// Number of features (vector length)
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub(crate) fn lowered(&self) -> &[String] {
        &self.lowered
    }

    /// First `n` columns, used for readiness snapshots
    pub fn sample(&self, n: usize) -> &[String] {
        &self.columns[..n.min(self.columns.len())]
    }

    pub fn layout_hash(&self) -> u32 {
        self.layout_hash
    }

    pub fn info(&self) -> LayoutInfo {
        LayoutInfo {
            hash: self.layout_hash,
            feature_count: self.columns.len(),
        }
    }

    /// Check the feature count a model declares against this schema
    pub fn check_feature_count(&self, model_features: usize) -> Result<(), LayoutMismatchError> {
        if model_features != self.columns.len() {
            return Err(LayoutMismatchError {
                expected_features: model_features,
                actual_features: self.columns.len(),
                layout_hash: self.layout_hash,
            });
        }
        Ok(())
    }
}

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of an ordered column list
pub fn compute_layout_hash(columns: &[String]) -> u32 {
    let mut hasher = Hasher::new();

    for name in columns {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

/// Layout summary for logging and status endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LayoutInfo {
    pub hash: u32,
    pub feature_count: usize,
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Model and schema disagree on the number of features
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutMismatchError {
    pub expected_features: usize,
    pub actual_features: usize,
    pub layout_hash: u32,
}

impl std::fmt::Display for LayoutMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Model expects {} features but we have {} symptom columns (layout hash: {:08x})",
            self.expected_features, self.actual_features, self.layout_hash
        )
    }
}

impl std::error::Error for LayoutMismatchError {}

// ============================================================================
// TESTS
// ============================================================================
