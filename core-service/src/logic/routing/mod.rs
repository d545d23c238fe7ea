//! Routing Module - from predicted disease to doctors
//!
//! - `department` - disease to department lookup with a "Medicine" default
//! - `doctors` - roster and random per-department sampling

pub mod department;
pub mod doctors;

pub use department::{DiseaseDepartmentRow, DiseaseDepartmentTable};
pub use doctors::{DoctorRecord, DoctorRoster};
