//! Compatibility queries used by the rest of the crate
//!
//! These are the only entry points for blood logic. They are pure and read
//! the shared [`CompatibilityTable`].

use crate::blood::table::CompatibilityTable;
use crate::blood::types::{BloodType, BloodTypeSet};
use crate::error::Result;

/// Donor types whose blood a patient of `patient` type may receive
///
/// Never empty for a valid type: every type can at least receive from itself.
#[must_use]
pub fn donors_compatible_with_patient(patient: BloodType) -> BloodTypeSet {
    CompatibilityTable::global().can_receive_from(patient)
}

/// Patient types a donor of `donor` type may give to
#[must_use]
pub fn patients_compatible_with_donor(donor: BloodType) -> BloodTypeSet {
    CompatibilityTable::global().can_donate_to(donor)
}

/// Whether a `donor` may give blood to a `patient`
#[must_use]
pub fn is_compatible(donor: BloodType, patient: BloodType) -> bool {
    patients_compatible_with_donor(donor).contains(patient)
}

/// Parse `patient` and return its compatible donor types
///
/// Fails with `InvalidBloodType` for anything outside the eight symbols;
/// an unknown input never yields an empty set.
pub fn donors_compatible_with_patient_symbol(patient: &str) -> Result<BloodTypeSet> {
    Ok(donors_compatible_with_patient(patient.parse()?))
}

/// Parse `donor` and return the patient types it can help
pub fn patients_compatible_with_donor_symbol(donor: &str) -> Result<BloodTypeSet> {
    Ok(patients_compatible_with_donor(donor.parse()?))
}

/// Parse both symbols and test compatibility
pub fn is_compatible_symbol(donor: &str, patient: &str) -> Result<bool> {
    Ok(is_compatible(donor.parse()?, patient.parse()?))
}
