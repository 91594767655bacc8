//! Domain models for the donor matching service
//!
//! This module contains the entity models stored by the donor and
//! patient-request stores, plus the validated input types used to create them.

pub mod donor;
pub mod patient;
pub mod types;
pub mod user;

// Re-export commonly used types
pub use donor::{Donor, DonorRegistration, MAX_DONOR_AGE, MIN_DONOR_AGE};
pub use patient::{NewPatientRequest, PatientRequest};
pub use types::{DonorId, RequestId, RequestStatus, Urgency, UserId};
pub use user::{UserProfile, UserRef};

use crate::error::{LifeLinkError, Result};

/// Trimmed value of a required text field
pub(crate) fn required_text<'a>(value: &'a str, field: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LifeLinkError::ValidationError(format!("{field} is required")));
    }
    Ok(trimmed)
}
