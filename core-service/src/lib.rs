//! Doctor Recommendation - Prediction Core
//!
//! Turns free-text symptoms into a predicted disease and a short list of
//! doctors, using a random forest loaded once at startup.
//!
//! ```text
//! symptoms ──► vectorize ──► cascade ──► department ──► doctors
//!                 │             │             │             │
//!           FeatureSchema   Ensemble +   disease table    roster
//!                           LabelSpace
//! ```

pub mod constants;
pub mod logic;

pub use logic::artifacts::{ArtifactPaths, ArtifactStatus, Artifacts};
pub use logic::error::{LoadError, StrategyError};
pub use logic::pipeline::{recommend, Recommendation};
