//! Donor matching service
//!
//! This module implements the `MatchService` which turns a patient's blood
//! type into a shortlist of available, compatible donors.

use std::time::Duration;

use chrono::Utc;

use crate::availability::EligibilityPolicy;
use crate::blood::{self, BloodType, BloodTypeSet};
use crate::config::LifeLinkConfig;
use crate::error::{LifeLinkError, Result, StoreError};
use crate::matching::result::{DonorSummary, MatchResult};
use crate::models::Donor;
use crate::store::filter::{DonorField, Expr};
use crate::store::DonorStore;

/// Matches patients with available compatible donors
///
/// Every call reads the store afresh; nothing is cached between calls.
#[derive(Debug)]
pub struct MatchService<S> {
    store: S,
    store_timeout: Option<Duration>,
    eligibility: EligibilityPolicy,
}

impl<S: DonorStore> MatchService<S> {
    /// Create a service over `store` with the default configuration
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_config(store, &LifeLinkConfig::default())
    }

    /// Create a service over `store` with the given configuration
    #[must_use]
    pub const fn with_config(store: S, config: &LifeLinkConfig) -> Self {
        Self {
            store,
            store_timeout: config.store_timeout,
            eligibility: config.eligibility,
        }
    }

    /// The underlying donor store
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Find every available donor whose type is compatible with `requested`
    ///
    /// Issues exactly one store read. Donors are returned in store order
    /// and every one of them is marked available.
    ///
    /// # Errors
    ///
    /// Returns [`LifeLinkError::StoreUnavailable`] if the store read fails
    /// or exceeds the configured timeout.
    pub async fn find_matches(&self, requested: BloodType) -> Result<MatchResult> {
        let compatible = blood::donors_compatible_with_patient(requested);
        let filter = self.match_filter(compatible);

        let donors = self.read_donors(&filter).await?;
        let donors = donors.iter().map(DonorSummary::from).collect();

        Ok(MatchResult::new(requested, compatible, donors))
    }

    /// Find matches for a blood type given as text
    ///
    /// The symbol is validated before the store is touched.
    ///
    /// # Errors
    ///
    /// Returns [`LifeLinkError::InvalidBloodType`] for an unknown symbol and
    /// [`LifeLinkError::StoreUnavailable`] if the store read fails.
    pub async fn find_matches_str(&self, requested: &str) -> Result<MatchResult> {
        let requested = BloodType::parse(requested)?;
        self.find_matches(requested).await
    }

    /// List available donors, optionally restricted to one exact type
    ///
    /// This is a directory listing, not a compatibility match: asking for
    /// `A+` returns only `A+` donors.
    pub async fn list_available_donors(
        &self,
        blood_type: Option<BloodType>,
    ) -> Result<Vec<DonorSummary>> {
        let filter = match blood_type {
            Some(blood_type) => Expr::available_with_types(BloodTypeSet::singleton(blood_type)),
            None => Expr::Eq(DonorField::IsAvailable, true.into()),
        };

        let donors = self.read_donors(&filter).await?;
        Ok(donors.iter().map(DonorSummary::from).collect())
    }

    fn match_filter(&self, compatible: BloodTypeSet) -> Expr {
        let base = Expr::available_with_types(compatible);
        match self.eligibility.interval_expr(Utc::now()) {
            Some(interval) => Expr::And(vec![base, interval]),
            None => base,
        }
    }

    async fn read_donors(&self, filter: &Expr) -> Result<Vec<Donor>> {
        let read = self.store.find(filter);
        let outcome = match self.store_timeout {
            Some(limit) => tokio::time::timeout(limit, read)
                .await
                .unwrap_or(Err(StoreError::Timeout(limit))),
            None => read.await,
        };
        outcome.map_err(LifeLinkError::StoreUnavailable)
    }
}
