//! Label Space - disease label encoder
//!
//! Codes are positions in the encoder's ordered class list.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::logic::error::{LoadError, StrategyError};

/// On-disk encoder shape: `{"classes": [...]}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoderFile {
    pub classes: Vec<String>,
}

/// Bijection between disease labels and integer codes
#[derive(Debug, Clone)]
pub struct LabelSpace {
    classes: Vec<String>,
}

impl LabelSpace {
    pub fn new(classes: Vec<String>) -> Result<Self, LoadError> {
        if classes.is_empty() {
            return Err(LoadError::EmptyLabelSpace);
        }

        let mut seen = HashSet::with_capacity(classes.len());
        for label in &classes {
            if !seen.insert(label.as_str()) {
                return Err(LoadError::DuplicateLabel(label.clone()));
            }
        }

        Ok(Self { classes })
    }

    /// Label for a code produced by the model
    pub fn decode(&self, code: usize) -> Result<&str, StrategyError> {
        self.classes
            .get(code)
            .map(String::as_str)
            .ok_or(StrategyError::UnknownLabelCode {
                code,
                size: self.classes.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

impl TryFrom<LabelEncoderFile> for LabelSpace {
    type Error = LoadError;

    fn try_from(file: LabelEncoderFile) -> Result<Self, Self::Error> {
        Self::new(file.classes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_uses_class_position() {
        let labels = LabelSpace::new(vec!["asthma".into(), "flu".into()]).unwrap();
        assert_eq!(labels.decode(0).unwrap(), "asthma");
        assert_eq!(labels.decode(1).unwrap(), "flu");
    }

    #[test]
    fn test_decode_out_of_range_is_strategy_error() {
        let labels = LabelSpace::new(vec!["flu".into()]).unwrap();
        assert_eq!(
            labels.decode(4),
            Err(StrategyError::UnknownLabelCode { code: 4, size: 1 })
        );
    }

    #[test]
    fn test_rejects_empty_and_duplicate_classes() {
        assert!(matches!(LabelSpace::new(vec![]), Err(LoadError::EmptyLabelSpace)));
        assert!(matches!(
            LabelSpace::new(vec!["flu".into(), "flu".into()]),
            Err(LoadError::DuplicateLabel(l)) if l == "flu"
        ));
    }
}
