//! Doctor roster and per-department sampling.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DEPARTMENT, DEFAULT_DOCTOR_DESIGNATION, DEFAULT_DOCTOR_NAME};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Designation")]
    pub designation: String,
    #[serde(rename = "Department")]
    pub department: String,
}

impl DoctorRecord {
    /// Placeholder returned when a department has nobody on the roster
    pub fn general_physician() -> Self {
        Self {
            name: DEFAULT_DOCTOR_NAME.to_string(),
            designation: DEFAULT_DOCTOR_DESIGNATION.to_string(),
            department: DEFAULT_DEPARTMENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DoctorRoster {
    doctors: Vec<DoctorRecord>,
}

impl DoctorRoster {
    /// Department names are cleaned of surrounding whitespace and stray
    /// parentheses left over from the faculty export.
    pub fn new(doctors: Vec<DoctorRecord>) -> Self {
        let doctors = doctors
            .into_iter()
            .map(|mut d| {
                d.department = clean_department(&d.department);
                d
            })
            .collect();
        Self { doctors }
    }

    pub fn len(&self) -> usize {
        self.doctors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doctors.is_empty()
    }

    pub fn doctors(&self) -> &[DoctorRecord] {
        &self.doctors
    }

    /// Everyone in a department, compared case-insensitively
    pub fn in_department(&self, department: &str) -> Vec<&DoctorRecord> {
        let wanted = department.to_lowercase();
        self.doctors
            .iter()
            .filter(|d| d.department.to_lowercase() == wanted)
            .collect()
    }

    /// Up to `max_count` doctors from a department, sampled uniformly
    /// without replacement. Empty when the department has nobody.
    pub fn select<R>(&self, department: &str, max_count: usize, rng: &mut R) -> Vec<DoctorRecord>
    where
        R: Rng + ?Sized,
    {
        let candidates = self.in_department(department);
        if candidates.is_empty() {
            log::warn!("No doctors found in department: {}", department);
            return Vec::new();
        }

        let count = max_count.min(candidates.len());
        candidates
            .choose_multiple(rng, count)
            .map(|d| (*d).clone())
            .collect()
    }
}

fn clean_department(raw: &str) -> String {
    raw.trim().trim_matches(')').trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn doctor(name: &str, department: &str) -> DoctorRecord {
        DoctorRecord {
            name: name.to_string(),
            designation: "Professor".to_string(),
            department: department.to_string(),
        }
    }

    fn roster() -> DoctorRoster {
        DoctorRoster::new(vec![
            doctor("Dr. A", "Medicine"),
            doctor("Dr. B", " medicine)"),
            doctor("Dr. C", "MEDICINE"),
            doctor("Dr. D", "Medicine "),
            doctor("Dr. E", "Cardiology"),
        ])
    }

    #[test]
    fn test_select_is_bounded_and_filtered() {
        let roster = roster();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let picked = roster.select("medicine", 3, &mut rng);
            assert_eq!(picked.len(), 3);
            assert!(picked.iter().all(|d| d.department.eq_ignore_ascii_case("medicine")));

            let mut names: Vec<_> = picked.iter().map(|d| d.name.as_str()).collect();
            names.sort();
            names.dedup();
            assert_eq!(names.len(), 3, "sampled without replacement");
        }
    }

    #[test]
    fn test_select_returns_all_when_fewer_than_max() {
        let roster = roster();
        let mut rng = StdRng::seed_from_u64(1);
        let picked = roster.select("CARDIOLOGY", 3, &mut rng);
        assert_eq!(picked, vec![doctor("Dr. E", "Cardiology")]);
    }

    #[test]
    fn test_select_unknown_department_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(roster().select("Oncology", 3, &mut rng).is_empty());
        assert!(roster().select("Medicine", 0, &mut rng).is_empty());
    }

    #[test]
    fn test_seeded_selection_is_reproducible() {
        let roster = roster();
        let a = roster.select("Medicine", 2, &mut StdRng::seed_from_u64(42));
        let b = roster.select("Medicine", 2, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_department_cleanup() {
        let roster = roster();
        assert_eq!(roster.doctors()[1].department, "medicine");
        assert_eq!(roster.in_department("Medicine").len(), 4);
    }

    #[test]
    fn test_records_use_faculty_field_names() {
        let json = serde_json::to_value(DoctorRecord::general_physician()).unwrap();
        assert_eq!(json["Name"], "Dr. General Medicine");
        assert_eq!(json["Designation"], "General Physician");
        assert_eq!(json["Department"], "Medicine");
    }
}
