//! Donor availability
//!
//! Availability is owned by the donor and changed through the operations in
//! this module. Matching only reads it: a match computed just before a flag
//! flip may still contain that donor.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LifeLinkError, Result};
use crate::models::{Donor, DonorId};
use crate::store::DonorStore;
use crate::store::filter::{DonorField, Expr};

/// Whole-blood donation interval commonly used by blood services
pub const STANDARD_DONATION_INTERVAL_DAYS: i64 = 56;

/// Partial update of a donor's availability state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityUpdate {
    /// New availability flag
    pub is_available: Option<bool>,
    /// New last donation time
    pub last_donation: Option<DateTime<Utc>>,
}

impl AvailabilityUpdate {
    /// Update that only sets the availability flag
    #[must_use]
    pub const fn set_available(is_available: bool) -> Self {
        Self {
            is_available: Some(is_available),
            last_donation: None,
        }
    }

    /// Update that records a donation at `at`
    #[must_use]
    pub const fn donated_at(at: DateTime<Utc>) -> Self {
        Self {
            is_available: None,
            last_donation: Some(at),
        }
    }

    /// Apply the update to a donor record
    pub fn apply(&self, donor: &mut Donor) {
        if let Some(is_available) = self.is_available {
            donor.is_available = is_available;
        }
        if let Some(at) = self.last_donation {
            donor.last_donation = Some(at);
        }
    }
}

/// Rule deciding which available donors are eligible to be matched
///
/// The default only looks at the availability flag. Setting a minimum
/// interval also excludes donors whose last donation is too recent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EligibilityPolicy {
    /// Minimum time since the last donation
    pub min_donation_interval: Option<Duration>,
}

impl EligibilityPolicy {
    /// Policy that only checks the availability flag
    #[must_use]
    pub const fn availability_only() -> Self {
        Self {
            min_donation_interval: None,
        }
    }

    /// Policy with the standard 56-day donation interval
    #[must_use]
    pub fn standard_interval() -> Self {
        Self::with_interval(Duration::days(STANDARD_DONATION_INTERVAL_DAYS))
    }

    /// Policy with a custom minimum interval
    #[must_use]
    pub const fn with_interval(interval: Duration) -> Self {
        Self {
            min_donation_interval: Some(interval),
        }
    }

    /// Whether `donor` is eligible at `now`
    #[must_use]
    pub fn is_eligible(&self, donor: &Donor, now: DateTime<Utc>) -> bool {
        if !donor.is_available {
            return false;
        }
        match (self.min_donation_interval, donor.last_donation) {
            (Some(interval), Some(last)) => last <= now - interval,
            _ => true,
        }
    }

    /// Extra store predicate for the interval rule, if one is configured
    #[must_use]
    pub fn interval_expr(&self, now: DateTime<Utc>) -> Option<Expr> {
        let interval = self.min_donation_interval?;
        Some(Expr::Or(vec![
            Expr::IsNull(DonorField::LastDonation),
            Expr::LtEq(DonorField::LastDonation, (now - interval).into()),
        ]))
    }
}

/// Set a donor's availability flag
pub async fn set_availability<S: DonorStore>(
    store: &S,
    id: DonorId,
    is_available: bool,
) -> Result<Donor> {
    let donor = store
        .update_availability(id, AvailabilityUpdate::set_available(is_available))
        .await
        .map_err(LifeLinkError::from_store)?;

    log::info!("Donor {id} availability set to {is_available}");
    Ok(donor)
}

/// Record a donation, updating the donor's last donation time
pub async fn record_donation<S: DonorStore>(
    store: &S,
    id: DonorId,
    at: DateTime<Utc>,
) -> Result<Donor> {
    if at > Utc::now() {
        return Err(LifeLinkError::ValidationError(
            "donation time cannot be in the future".to_string(),
        ));
    }

    let donor = store
        .update_availability(id, AvailabilityUpdate::donated_at(at))
        .await
        .map_err(LifeLinkError::from_store)?;

    log::info!("Recorded donation for donor {id} at {at}");
    Ok(donor)
}
