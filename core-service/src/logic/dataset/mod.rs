//! Raw Symptom Dataset - last-resort lookup
//!
//! The training dataset in JSON-lines form: the first line is the header
//! (array of column names, including the `diseases` label column), every
//! following line is one row (array of values in header order, 0/1 for
//! symptom columns). Only the positions of 1s are kept in memory.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde_json::Value;

use crate::constants::DATASET_LABEL_COLUMN;
use crate::logic::error::LoadError;
use crate::logic::model::vote::majority;

/// Result of a symptom lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetMatch {
    pub disease: String,
    /// Total matched rows across all tokens and columns
    pub matched_count: usize,
}

#[derive(Debug, Clone)]
struct SymptomColumn {
    lowered: String,
    /// Rows with indicator 1, ascending
    rows: Vec<u32>,
}

#[derive(Debug, Clone)]
pub struct SymptomDataset {
    columns: Vec<SymptomColumn>,
    labels: Vec<String>,
}

impl SymptomDataset {
    /// Load from a JSON-lines file
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let lines = BufReader::new(file).lines().map(|line| {
            line.map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            })
        });

        let dataset = Self::parse(lines)?;
        log::info!("Loaded original dataset with {} rows", dataset.row_count());
        Ok(dataset)
    }

    /// Parse header and rows from JSON lines; blank lines are skipped
    pub fn from_lines<'a, I>(lines: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self::parse(lines.into_iter().map(Ok))
    }

    /// Streams lines one at a time; only the sparse index is kept
    fn parse<I, S>(lines: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = Result<S, LoadError>>,
        S: AsRef<str>,
    {
        let mut lines = lines.into_iter().enumerate().filter_map(|(i, line)| match line {
            Ok(l) if l.as_ref().trim().is_empty() => None,
            other => Some((i + 1, other)),
        });

        let (header_line, header) = lines.next().ok_or(LoadError::InvalidDataset {
            line: 1,
            reason: "missing header".to_string(),
        })?;
        let header: Vec<String> =
            serde_json::from_str(header?.as_ref().trim()).map_err(|e| LoadError::InvalidDataset {
                line: header_line,
                reason: format!("header is not an array of column names: {}", e),
            })?;

        let label_index = header
            .iter()
            .position(|c| c == DATASET_LABEL_COLUMN)
            .ok_or_else(|| LoadError::InvalidDataset {
                line: header_line,
                reason: format!("no '{}' column", DATASET_LABEL_COLUMN),
            })?;

        let mut columns: Vec<(usize, SymptomColumn)> = header
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != label_index)
            .map(|(i, name)| {
                (
                    i,
                    SymptomColumn {
                        lowered: name.to_lowercase(),
                        rows: Vec::new(),
                    },
                )
            })
            .collect();
        let mut labels = Vec::new();

        for (line_no, line) in lines {
            let line = line?;
            let row: Vec<Value> = serde_json::from_str(line.as_ref().trim()).map_err(|e| LoadError::InvalidDataset {
                line: line_no,
                reason: e.to_string(),
            })?;
            if row.len() != header.len() {
                return Err(LoadError::InvalidDataset {
                    line: line_no,
                    reason: format!("expected {} values, found {}", header.len(), row.len()),
                });
            }

            let row_index = u32::try_from(labels.len()).map_err(|_| LoadError::InvalidDataset {
                line: line_no,
                reason: "too many rows".to_string(),
            })?;
            labels.push(label_text(&row[label_index]));

            for (position, column) in columns.iter_mut() {
                if is_present(&row[*position]) {
                    column.rows.push(row_index);
                }
            }
        }

        Ok(Self {
            columns: columns.into_iter().map(|(_, c)| c).collect(),
            labels,
        })
    }

    pub fn row_count(&self) -> usize {
        self.labels.len()
    }

    /// Symptom columns, label column excluded
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Disease of every row that has a 1 in any column containing a token.
    ///
    /// Rows are collected once per (token, column) pair, so a row reached
    /// through several columns counts several times.
    pub fn matching_diseases<'s>(&'s self, tokens: &[String]) -> Vec<&'s str> {
        let mut matches = Vec::new();

        for token in tokens {
            for column in self.columns.iter().filter(|c| c.lowered.contains(token.as_str())) {
                matches.extend(column.rows.iter().map(|&r| self.labels[r as usize].as_str()));
            }
        }

        matches
    }

    /// Most frequent matching disease, ties by first-encountered
    pub fn most_common_match(&self, tokens: &[String]) -> Option<DatasetMatch> {
        let matches = self.matching_diseases(tokens);
        let matched_count = matches.len();

        majority(matches).map(|(disease, _)| DatasetMatch {
            disease: disease.to_string(),
            matched_count,
        })
    }
}

fn label_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Indicator equals 1 (numeric), anything else counts as absent
fn is_present(value: &Value) -> bool {
    value.as_f64() == Some(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATASET: &str = r#"["diseases", "high fever", "dry cough", "skin rash"]
["flu", 1, 1, 0]
["measles", 1, 0, 1]
["flu", 1, 0, 0]

["common cold", 0, 1, 0]"#;

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_counts() {
        let ds = SymptomDataset::from_lines(DATASET.lines()).unwrap();
        assert_eq!(ds.row_count(), 4);
        assert_eq!(ds.column_count(), 3);
    }

    #[test]
    fn test_most_common_match() {
        let ds = SymptomDataset::from_lines(DATASET.lines()).unwrap();
        let found = ds.most_common_match(&tokens(&["fever"])).unwrap();
        assert_eq!(found.disease, "flu");
        assert_eq!(found.matched_count, 3);
    }

    #[test]
    fn test_matches_accumulate_across_tokens() {
        let ds = SymptomDataset::from_lines(DATASET.lines()).unwrap();
        let matches = ds.matching_diseases(&tokens(&["cough", "rash"]));
        assert_eq!(matches, vec!["flu", "common cold", "measles"]);

        // tie between all three, first seen wins
        let found = ds.most_common_match(&tokens(&["cough", "rash"])).unwrap();
        assert_eq!(found.disease, "flu");
        assert_eq!(found.matched_count, 3);
    }

    #[test]
    fn test_no_match() {
        let ds = SymptomDataset::from_lines(DATASET.lines()).unwrap();
        assert_eq!(ds.most_common_match(&tokens(&["vertigo"])), None);
        assert_eq!(ds.most_common_match(&[]), None);
    }

    #[test]
    fn test_label_column_is_not_searched() {
        let ds = SymptomDataset::from_lines(DATASET.lines()).unwrap();
        assert!(ds.matching_diseases(&tokens(&["diseases"])).is_empty());
    }

    #[test]
    fn test_missing_label_column_is_invalid() {
        let err = SymptomDataset::from_lines(["[\"fever\"]", "[1]"]).unwrap_err();
        assert!(matches!(err, LoadError::InvalidDataset { line: 1, .. }));
    }

    #[test]
    fn test_load_streams_file_lines() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("symptom_dataset.jsonl");
        std::fs::write(&path, format!("\n{}\n\n", DATASET)).unwrap();

        let ds = SymptomDataset::load(&path).unwrap();
        assert_eq!(ds.row_count(), 4);
        assert_eq!(ds.most_common_match(&tokens(&["rash"])).unwrap().disease, "measles");
    }

    #[test]
    fn test_load_reports_file_line_of_bad_row() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("symptom_dataset.jsonl");
        std::fs::write(&path, "[\"diseases\", \"fever\"]\n\n[\"flu\", 1]\n[\"flu\", \n").unwrap();

        let err = SymptomDataset::load(&path).unwrap_err();
        assert!(matches!(err, LoadError::InvalidDataset { line: 4, .. }));
    }

    #[test]
    fn test_short_row_is_invalid() {
        let err = SymptomDataset::from_lines(["[\"diseases\", \"fever\"]", "[\"flu\"]"]).unwrap_err();
        assert!(matches!(err, LoadError::InvalidDataset { line: 2, .. }));
    }
}
