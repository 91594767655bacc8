//! Result types returned by the matching service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::blood::{BloodType, BloodTypeSet};
use crate::models::{Donor, DonorId, PatientRequest};

/// Donor fields exposed to callers of the matching service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorSummary {
    /// Donor record identifier
    pub id: DonorId,
    /// Display name from the owning user
    pub name: String,
    /// Contact e-mail from the owning user
    pub email: String,
    /// Donor's blood type
    pub blood_type: BloodType,
    /// Contact phone
    pub phone: String,
    /// Address or location
    pub address: String,
    /// Availability flag; always true inside a [`MatchResult`]
    pub is_available: bool,
    /// Time of the most recent donation
    pub last_donation: Option<DateTime<Utc>>,
}

impl From<&Donor> for DonorSummary {
    fn from(donor: &Donor) -> Self {
        Self {
            id: donor.id,
            name: donor.user.name.clone(),
            email: donor.user.email.clone(),
            blood_type: donor.blood_type,
            phone: donor.phone.clone(),
            address: donor.address.clone(),
            is_available: donor.is_available,
            last_donation: donor.last_donation,
        }
    }
}

/// Donor shortlist for one requested blood type
///
/// Ephemeral: built per call and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// Blood type the patient needs
    pub requested_blood_type: BloodType,
    /// Donor types the patient may receive from, in canonical order
    pub compatible_blood_types: BloodTypeSet,
    /// Available donors of a compatible type
    pub donors: Vec<DonorSummary>,
    /// Number of donors
    pub total_donors: usize,
}

impl MatchResult {
    /// Assemble a result, deriving the count from the donor list
    #[must_use]
    pub fn new(
        requested_blood_type: BloodType,
        compatible_blood_types: BloodTypeSet,
        donors: Vec<DonorSummary>,
    ) -> Self {
        let total_donors = donors.len();
        Self {
            requested_blood_type,
            compatible_blood_types,
            donors,
            total_donors,
        }
    }

    /// Whether no donor is currently available
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.donors.is_empty()
    }
}

/// A pending request together with its current donor shortlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMatch {
    /// The patient request
    pub request: PatientRequest,
    /// Donors able to help it
    pub result: MatchResult,
}
