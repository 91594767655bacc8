//! ABO/Rh blood type compatibility
//!
//! This module holds the blood type value types, the static compatibility
//! table and the pure query functions built on it.

pub mod engine;
pub mod table;
pub mod types;

pub use engine::{
    donors_compatible_with_patient, donors_compatible_with_patient_symbol, is_compatible,
    is_compatible_symbol, patients_compatible_with_donor, patients_compatible_with_donor_symbol,
};
pub use table::{CompatibilityTable, TableDefect};
pub use types::{BloodType, BloodTypeSet};
