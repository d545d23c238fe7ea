//! Disease to department lookup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_DEPARTMENT;

/// One row of the disease mapping file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseDepartmentRow {
    #[serde(rename = "Diseases")]
    pub disease: String,
    #[serde(rename = "Department", default)]
    pub department: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DiseaseDepartmentTable {
    /// Normalized disease name -> trimmed department
    departments: HashMap<String, String>,
}

impl DiseaseDepartmentTable {
    /// Build from mapping rows. The first row for a disease wins; rows
    /// without a department are skipped.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = DiseaseDepartmentRow>,
    {
        let mut departments = HashMap::new();

        for row in rows {
            let department = match row.department.as_deref().map(str::trim) {
                Some(d) if !d.is_empty() => d.to_string(),
                _ => {
                    log::warn!("Skipping disease '{}' with no department", row.disease.trim());
                    continue;
                }
            };
            departments.entry(normalize(&row.disease)).or_insert(department);
        }

        Self { departments }
    }

    /// Department for a disease, `"Medicine"` when unknown
    pub fn resolve(&self, disease: &str) -> &str {
        match self.departments.get(&normalize(disease)) {
            Some(department) => {
                log::info!("Found department: {}", department);
                department
            }
            None => {
                log::warn!(
                    "No department found for disease '{}', defaulting to '{}'",
                    disease,
                    DEFAULT_DEPARTMENT
                );
                DEFAULT_DEPARTMENT
            }
        }
    }

    pub fn len(&self) -> usize {
        self.departments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.departments.is_empty()
    }
}

fn normalize(disease: &str) -> String {
    disease.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(disease: &str, department: Option<&str>) -> DiseaseDepartmentRow {
        DiseaseDepartmentRow {
            disease: disease.to_string(),
            department: department.map(str::to_string),
        }
    }

    fn table() -> DiseaseDepartmentTable {
        DiseaseDepartmentTable::from_rows(vec![
            row("Flu", Some("Medicine")),
            row("  Otitis Media ", Some(" ENT ")),
            row("Acne", Some("Dermatology")),
            row("acne", Some("Cosmetology")),
            row("Mystery", None),
        ])
    }

    #[test]
    fn test_resolve_ignores_case_and_whitespace() {
        let table = table();
        assert_eq!(table.resolve("flu "), "Medicine");
        assert_eq!(table.resolve("OTITIS MEDIA"), "ENT");
        assert_eq!(table.resolve("  otitis media\t"), "ENT");
    }

    #[test]
    fn test_miss_defaults_to_medicine() {
        let table = table();
        assert_eq!(table.resolve("Dengue"), DEFAULT_DEPARTMENT);
        assert_eq!(table.resolve(""), "Medicine");
        assert_eq!(table.resolve("Mystery"), "Medicine");
    }

    #[test]
    fn test_first_row_wins() {
        assert_eq!(table().resolve("ACNE"), "Dermatology");
        assert_eq!(table().len(), 3);
    }

    #[test]
    fn test_rows_deserialize_from_mapping_file() {
        let rows: Vec<DiseaseDepartmentRow> = serde_json::from_str(
            r#"[{"Diseases": "Flu", "Department": "Medicine"}, {"Diseases": "Gout"}]"#,
        )
        .unwrap();
        let table = DiseaseDepartmentTable::from_rows(rows);
        assert_eq!(table.len(), 1);
    }
}
