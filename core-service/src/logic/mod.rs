//! Logic Module - Prediction pipeline
//!
//! - `features/` - symptom schema and vectorizer
//! - `model/` - forest, label encoder and the prediction cascade
//! - `dataset/` - raw symptom dataset for the last-resort fallback
//! - `routing/` - disease to department, department to doctors
//! - `artifacts/` - one-time loading of everything above

pub mod artifacts;
pub mod dataset;
pub mod error;
pub mod features;
pub mod model;
pub mod pipeline;
pub mod routing;
