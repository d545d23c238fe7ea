//! Features Module - Symptom Vectorization
//!
//! - `layout` - the ordered symptom column schema and its layout hash
//! - `vector` - binary feature vectors and the text vectorizer

pub mod layout;
pub mod vector;


// Re-export common types
pub use layout::{FeatureSchema, LayoutInfo, LayoutMismatchError};
pub use vector::{parse_symptoms, vectorize, FeatureVector, Vectorized};
