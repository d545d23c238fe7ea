//! Feature Vector - Binary symptom indicators
//!
//! Turns free-text symptoms into a 0/1 vector aligned to a `FeatureSchema`.
//!
//! Matching is loose on purpose: a column is set when any input token is a
//! substring of the lowercased column name, so short tokens such as "pain"
//! light up every column that contains them.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::layout::FeatureSchema;

// ============================================================================
// FEATURE VECTOR
// ============================================================================

/// Fixed-length binary vector, one slot per schema column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Layout hash of the schema this vector was built against
    pub layout_hash: u32,
    values: Vec<u8>,
}

impl FeatureVector {
    /// All-zero vector for a schema
    pub fn zeros(schema: &FeatureSchema) -> Self {
        Self {
            layout_hash: schema.layout_hash(),
            values: vec![0; schema.len()],
        }
    }

    /// Build from raw values; anything non-zero is stored as 1
    pub fn from_values(layout_hash: u32, values: Vec<u8>) -> Self {
        Self {
            layout_hash,
            values: values.into_iter().map(|v| u8::from(v != 0)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.values
    }

    /// Feature value as the float a tree split compares against
    pub fn get(&self, index: usize) -> Option<f32> {
        self.values.get(index).map(|&v| f32::from(v))
    }

    /// Number of features set to 1
    pub fn nonzero_count(&self) -> usize {
        self.values.iter().filter(|&&v| v != 0).count()
    }

    fn set(&mut self, index: usize) {
        if let Some(slot) = self.values.get_mut(index) {
            *slot = 1;
        }
    }
}

// ============================================================================
// VECTORIZER
// ============================================================================

/// Result of vectorizing one request
#[derive(Debug, Clone)]
pub struct Vectorized {
    pub vector: FeatureVector,
    /// Trimmed, lowercased, de-duplicated tokens in input order
    pub tokens: Vec<String>,
    /// Tokens that matched at least one column
    pub matched_tokens: usize,
    /// Columns set to 1
    pub nonzero_features: usize,
}

/// Split comma-separated symptoms into normalized tokens.
///
/// Empty tokens are dropped and repeats keep their first position.
pub fn parse_symptoms(text: &str) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut tokens: Vec<String> = Vec::new();

    for raw in text.split(',') {
        let token = raw.trim().to_lowercase();
        if token.is_empty() || seen.contains(&token) {
            continue;
        }
        seen.insert(token.clone());
        tokens.push(token);
    }

    tokens
}

/// Vectorize a symptom string against the schema.
///
/// Never fails; an all-zero vector means no known symptom matched.
pub fn vectorize(text: &str, schema: &FeatureSchema) -> Vectorized {
    let tokens = parse_symptoms(text);
    let mut vector = FeatureVector::zeros(schema);

    for (index, column) in schema.lowered().iter().enumerate() {
        if tokens.iter().any(|t| column.contains(t.as_str())) {
            vector.set(index);
        }
    }

    let matched_tokens = tokens
        .iter()
        .filter(|t| schema.lowered().iter().any(|c| c.contains(t.as_str())))
        .count();
    let nonzero_features = vector.nonzero_count();

    log::info!(
        "Found {}/{} symptoms in model columns, {} non-zero features out of {}",
        matched_tokens,
        tokens.len(),
        nonzero_features,
        vector.len()
    );

    Vectorized {
        vector,
        tokens,
        matched_tokens,
        nonzero_features,
    }
}
