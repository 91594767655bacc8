//! Donor entity model
//!
//! A donor record is created once at registration. Only `is_available` and
//! `last_donation` change afterwards, through the availability operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::blood::BloodType;
use crate::error::{LifeLinkError, Result};
use crate::models::required_text;
use crate::models::types::DonorId;
use crate::models::user::UserRef;

/// Youngest accepted donor age
pub const MIN_DONOR_AGE: u8 = 18;
/// Oldest accepted donor age
pub const MAX_DONOR_AGE: u8 = 65;

const fn default_available() -> bool {
    true
}

/// A registered blood donor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donor {
    /// Record identifier
    pub id: DonorId,
    /// Owning user with joined display fields
    pub user: UserRef,
    /// Donor's blood type
    pub blood_type: BloodType,
    /// Contact phone
    pub phone: String,
    /// Address or location
    pub address: String,
    /// Age at registration
    pub age: u8,
    /// Whether the donor is currently willing and able to donate
    #[serde(default = "default_available")]
    pub is_available: bool,
    /// Time of the most recent donation
    #[serde(default)]
    pub last_donation: Option<DateTime<Utc>>,
    /// Registration time
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Donor {
    /// Create an available donor without input validation
    #[must_use]
    pub fn new(
        id: DonorId,
        user: UserRef,
        blood_type: BloodType,
        phone: impl Into<String>,
        address: impl Into<String>,
        age: u8,
    ) -> Self {
        Self {
            id,
            user,
            blood_type,
            phone: phone.into(),
            address: address.into(),
            age,
            is_available: true,
            last_donation: None,
            created_at: Utc::now(),
        }
    }

    /// Set the availability flag
    #[must_use]
    pub fn with_availability(mut self, is_available: bool) -> Self {
        self.is_available = is_available;
        self
    }

    /// Set the last donation time
    #[must_use]
    pub fn with_last_donation(mut self, at: DateTime<Utc>) -> Self {
        self.last_donation = Some(at);
        self
    }

    /// Check a record built outside registration, e.g. loaded from a seed file
    pub fn validate(&self) -> Result<()> {
        required_text(&self.phone, "phone")?;
        required_text(&self.address, "address")?;
        checked_age(i64::from(self.age))?;
        Ok(())
    }
}

fn checked_age(age: i64) -> Result<u8> {
    u8::try_from(age)
        .ok()
        .filter(|age| (MIN_DONOR_AGE..=MAX_DONOR_AGE).contains(age))
        .ok_or_else(|| {
            LifeLinkError::ValidationError(format!(
                "donor age must be between {MIN_DONOR_AGE} and {MAX_DONOR_AGE} (got {age})"
            ))
        })
}

/// Donor registration input as submitted by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorRegistration {
    /// Blood type symbol
    pub blood_type: String,
    /// Contact phone
    pub phone: String,
    /// Address or location
    pub address: String,
    /// Age in years
    pub age: i64,
}

impl DonorRegistration {
    /// Validate the input and build the donor record
    pub fn into_donor(self, id: DonorId, user: UserRef) -> Result<Donor> {
        let blood_type: BloodType = self.blood_type.parse()?;

        let phone = required_text(&self.phone, "phone")?;
        let address = required_text(&self.address, "address")?;
        let age = checked_age(self.age)?;

        Ok(Donor::new(id, user, blood_type, phone, address, age))
    }
}
