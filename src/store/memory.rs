//! In-memory store implementations
//!
//! Records live in `FxHashMap`s behind async read-write locks. Donor scans
//! switch to a rayon parallel iterator once the store is large enough.

use std::sync::atomic::{AtomicU64, Ordering};

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;

use crate::availability::AvailabilityUpdate;
use crate::error::StoreError;
use crate::models::{Donor, DonorId, PatientRequest, RequestId, RequestStatus, UserId};
use crate::store::filter::Expr;
use crate::store::{DonorStore, PatientRequestStore, RequestFilter, StoreResult};

/// Monotonic id source that never wraps
#[derive(Debug)]
struct IdSequence {
    last: AtomicU64,
    entity: &'static str,
}

impl IdSequence {
    fn after(ids: impl Iterator<Item = u64>, entity: &'static str) -> Self {
        Self {
            last: AtomicU64::new(ids.max().unwrap_or(0)),
            entity,
        }
    }

    /// Record an id assigned elsewhere so it is never issued again
    fn observe(&self, id: u64) {
        self.last.fetch_max(id, Ordering::Relaxed);
    }

    fn next(&self) -> StoreResult<u64> {
        self.last
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |last| last.checked_add(1))
            .map(|last| last + 1)
            .map_err(|_| StoreError::Unavailable(format!("{} id space exhausted", self.entity)))
    }
}

/// Donor store held entirely in memory
#[derive(Debug)]
pub struct InMemoryDonorStore {
    donors: RwLock<FxHashMap<DonorId, Donor>>,
    ids: IdSequence,
    parallel_threshold: usize,
}

impl InMemoryDonorStore {
    /// Store size at which scans run in parallel
    pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1000;

    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::from_donors(Vec::new())
    }

    /// Create a store holding `donors`
    #[must_use]
    pub fn from_donors(donors: Vec<Donor>) -> Self {
        let ids = IdSequence::after(donors.iter().map(|d| d.id.0), "donor");
        let donors = donors.into_iter().map(|d| (d.id, d)).collect();
        Self {
            donors: RwLock::new(donors),
            ids,
            parallel_threshold: Self::DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Set the store size at which scans run in parallel
    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }
}

impl Default for InMemoryDonorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DonorStore for InMemoryDonorStore {
    async fn find(&self, filter: &Expr) -> StoreResult<Vec<Donor>> {
        let donors = self.donors.read().await;

        let mut selected: Vec<Donor> = if donors.len() >= self.parallel_threshold {
            donors
                .par_iter()
                .filter(|(_, donor)| filter.evaluate(donor))
                .map(|(_, donor)| donor.clone())
                .collect()
        } else {
            donors
                .values()
                .filter(|donor| filter.evaluate(donor))
                .cloned()
                .collect()
        };

        selected.sort_unstable_by_key(|donor| donor.id);
        Ok(selected)
    }

    async fn get(&self, id: DonorId) -> StoreResult<Option<Donor>> {
        Ok(self.donors.read().await.get(&id).cloned())
    }

    async fn find_by_user(&self, user: UserId) -> StoreResult<Option<Donor>> {
        Ok(self
            .donors
            .read()
            .await
            .values()
            .find(|donor| donor.user.id == user)
            .cloned())
    }

    async fn next_id(&self) -> StoreResult<DonorId> {
        self.ids.next().map(DonorId)
    }

    async fn insert(&self, donor: Donor) -> StoreResult<()> {
        self.ids.observe(donor.id.0);
        self.donors.write().await.insert(donor.id, donor);
        Ok(())
    }

    async fn update_availability(
        &self,
        id: DonorId,
        update: AvailabilityUpdate,
    ) -> StoreResult<Donor> {
        let mut donors = self.donors.write().await;
        let donor = donors.get_mut(&id).ok_or_else(|| StoreError::NotFound {
            entity: "donor",
            id: id.to_string(),
        })?;
        update.apply(donor);
        Ok(donor.clone())
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.donors.read().await.len())
    }
}

/// Patient request store held entirely in memory
#[derive(Debug)]
pub struct InMemoryRequestStore {
    requests: RwLock<FxHashMap<RequestId, PatientRequest>>,
    ids: IdSequence,
}

impl InMemoryRequestStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::from_requests(Vec::new())
    }

    /// Create a store holding `requests`
    #[must_use]
    pub fn from_requests(requests: Vec<PatientRequest>) -> Self {
        let ids = IdSequence::after(requests.iter().map(|r| r.id.0), "request");
        let requests = requests.into_iter().map(|r| (r.id, r)).collect();
        Self {
            requests: RwLock::new(requests),
            ids,
        }
    }
}

impl Default for InMemoryRequestStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PatientRequestStore for InMemoryRequestStore {
    async fn list(&self, filter: RequestFilter) -> StoreResult<Vec<PatientRequest>> {
        let mut selected: Vec<PatientRequest> = self
            .requests
            .read()
            .await
            .values()
            .filter(|request| filter.matches(request))
            .cloned()
            .collect();
        selected.sort_unstable_by_key(|request| request.id);
        Ok(selected)
    }

    async fn get(&self, id: RequestId) -> StoreResult<Option<PatientRequest>> {
        Ok(self.requests.read().await.get(&id).cloned())
    }

    async fn next_id(&self) -> StoreResult<RequestId> {
        self.ids.next().map(RequestId)
    }

    async fn insert(&self, request: PatientRequest) -> StoreResult<()> {
        self.ids.observe(request.id.0);
        self.requests.write().await.insert(request.id, request);
        Ok(())
    }

    async fn set_status(&self, id: RequestId, status: RequestStatus) -> StoreResult<PatientRequest> {
        let mut requests = self.requests.write().await;
        let request = requests.get_mut(&id).ok_or_else(|| StoreError::NotFound {
            entity: "request",
            id: id.to_string(),
        })?;
        request.status = status;
        Ok(request.clone())
    }
}
