//! Patient blood request model
//!
//! A request is submitted once. Moving it from `pending` to `fulfilled`
//! happens outside matching; matching only finds candidate donors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::blood::BloodType;
use crate::error::Result;
use crate::models::required_text;
use crate::models::types::{RequestId, RequestStatus, Urgency};
use crate::models::user::UserRef;

/// A patient's need for blood
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRequest {
    /// Record identifier
    pub id: RequestId,
    /// Requesting user
    pub user: UserRef,
    /// Blood type needed
    pub blood_type: BloodType,
    /// Contact phone
    pub phone: String,
    /// Hospital where the patient is treated
    pub hospital: String,
    /// Urgency of the need
    #[serde(default)]
    pub urgency: Urgency,
    /// Request status
    #[serde(default)]
    pub status: RequestStatus,
    /// Submission time
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl PatientRequest {
    /// Whether the request still needs a donor
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    /// Check a record built outside submission
    pub fn validate(&self) -> Result<()> {
        required_text(&self.phone, "phone")?;
        required_text(&self.hospital, "hospital")?;
        Ok(())
    }
}

/// Request submission input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatientRequest {
    /// Blood type symbol
    pub blood_type: String,
    /// Contact phone
    pub phone: String,
    /// Hospital name
    pub hospital: String,
    /// Urgency, `medium` when absent
    #[serde(default)]
    pub urgency: Option<String>,
}

impl NewPatientRequest {
    /// Validate the input and build a pending request
    pub fn into_request(self, id: RequestId, user: UserRef) -> Result<PatientRequest> {
        let blood_type: BloodType = self.blood_type.parse()?;

        let phone = required_text(&self.phone, "phone")?;
        let hospital = required_text(&self.hospital, "hospital")?;

        let urgency = match self.urgency.as_deref() {
            Some(raw) => raw.parse()?,
            None => Urgency::default(),
        };

        Ok(PatientRequest {
            id,
            user,
            blood_type,
            phone: phone.to_string(),
            hospital: hospital.to_string(),
            urgency,
            status: RequestStatus::Pending,
            created_at: Utc::now(),
        })
    }
}
