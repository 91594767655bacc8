//! Directory statistics
//!
//! Counts over the donor and request stores, as shown on an administrator
//! dashboard.

use std::collections::BTreeMap;
use std::fmt::Write;

use itertools::Itertools;
use serde::Serialize;

use crate::blood::BloodType;
use crate::error::{LifeLinkError, Result};
use crate::models::Urgency;
use crate::store::filter::Expr;
use crate::store::{DonorStore, PatientRequestStore, RequestFilter};

/// Snapshot of directory counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryStats {
    /// Registered donors
    pub total_donors: usize,
    /// Donors currently available
    pub available_donors: usize,
    /// Available donors per blood type
    pub available_by_blood_type: BTreeMap<BloodType, usize>,
    /// All requests
    pub total_requests: usize,
    /// Requests still pending
    pub pending_requests: usize,
    /// Pending requests per urgency
    pub pending_by_urgency: BTreeMap<Urgency, usize>,
}

impl DirectoryStats {
    /// Collect statistics from both stores
    pub async fn collect<D, R>(donors: &D, requests: &R) -> Result<Self>
    where
        D: DonorStore,
        R: PatientRequestStore,
    {
        let all_donors = donors
            .find(&Expr::AlwaysTrue)
            .await
            .map_err(LifeLinkError::StoreUnavailable)?;
        let all_requests = requests
            .list(RequestFilter::all())
            .await
            .map_err(LifeLinkError::StoreUnavailable)?;

        let available_by_blood_type: BTreeMap<BloodType, usize> = all_donors
            .iter()
            .filter(|donor| donor.is_available)
            .map(|donor| donor.blood_type)
            .counts()
            .into_iter()
            .collect();

        let pending_by_urgency: BTreeMap<Urgency, usize> = all_requests
            .iter()
            .filter(|request| request.is_pending())
            .map(|request| request.urgency)
            .counts()
            .into_iter()
            .collect();

        Ok(Self {
            total_donors: all_donors.len(),
            available_donors: available_by_blood_type.values().sum(),
            available_by_blood_type,
            total_requests: all_requests.len(),
            pending_requests: pending_by_urgency.values().sum(),
            pending_by_urgency,
        })
    }

    /// Human-readable summary
    #[must_use]
    pub fn summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str("Directory Summary:\n");
        let _ = writeln!(summary, "  Total Donors: {}", self.total_donors);
        let _ = writeln!(summary, "  Available Donors: {}", self.available_donors);
        for blood_type in BloodType::ALL {
            let count = self.available_by_blood_type.get(&blood_type).unwrap_or(&0);
            let _ = writeln!(summary, "    {blood_type}: {count}");
        }
        let _ = writeln!(summary, "  Total Requests: {}", self.total_requests);
        let _ = writeln!(summary, "  Pending Requests: {}", self.pending_requests);
        for (urgency, count) in self.pending_by_urgency.iter().rev() {
            let _ = writeln!(summary, "    {urgency}: {count}");
        }
        summary
    }
}
