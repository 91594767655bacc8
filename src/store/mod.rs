//! Donor and patient-request stores
//!
//! The stores are external collaborators of the matching service. This
//! module defines the operations the service needs from them and ships an
//! in-memory implementation used by the CLI and the tests.

pub mod filter;
pub mod memory;
pub mod seed;

use std::future::Future;
use std::sync::Arc;

use crate::availability::AvailabilityUpdate;
use crate::blood::BloodTypeSet;
use crate::error::StoreError;
use crate::models::{Donor, DonorId, PatientRequest, RequestId, RequestStatus, UserId};

pub use filter::{DonorField, Expr, LiteralValue};
pub use memory::{InMemoryDonorStore, InMemoryRequestStore};
pub use seed::{SeedData, load_seed};

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Persistence for donor records
pub trait DonorStore: Send + Sync {
    /// All donors selected by `filter`, ordered by id
    fn find(&self, filter: &Expr) -> impl Future<Output = StoreResult<Vec<Donor>>> + Send;

    /// A single donor by id
    fn get(&self, id: DonorId) -> impl Future<Output = StoreResult<Option<Donor>>> + Send;

    /// The donor profile owned by `user`, if any
    fn find_by_user(&self, user: UserId)
    -> impl Future<Output = StoreResult<Option<Donor>>> + Send;

    /// Reserve the identifier for a new record
    fn next_id(&self) -> impl Future<Output = StoreResult<DonorId>> + Send;

    /// Insert or replace a donor record
    fn insert(&self, donor: Donor) -> impl Future<Output = StoreResult<()>> + Send;

    /// Apply an availability update and return the updated record
    fn update_availability(
        &self,
        id: DonorId,
        update: AvailabilityUpdate,
    ) -> impl Future<Output = StoreResult<Donor>> + Send;

    /// Number of stored donors
    fn count(&self) -> impl Future<Output = StoreResult<usize>> + Send;
}

/// Selection over patient requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequestFilter {
    /// Only requests in this status
    pub status: Option<RequestStatus>,
    /// Only requests needing one of these blood types
    pub blood_types: Option<BloodTypeSet>,
}

impl RequestFilter {
    /// Every request
    #[must_use]
    pub const fn all() -> Self {
        Self {
            status: None,
            blood_types: None,
        }
    }

    /// Pending requests only
    #[must_use]
    pub const fn pending() -> Self {
        Self {
            status: Some(RequestStatus::Pending),
            blood_types: None,
        }
    }

    /// Restrict to the given blood types
    #[must_use]
    pub const fn with_blood_types(mut self, blood_types: BloodTypeSet) -> Self {
        self.blood_types = Some(blood_types);
        self
    }

    /// Whether `request` is selected
    #[must_use]
    pub fn matches(&self, request: &PatientRequest) -> bool {
        self.status.is_none_or(|status| request.status == status)
            && self
                .blood_types
                .is_none_or(|types| types.contains(request.blood_type))
    }
}

/// Persistence for patient requests
pub trait PatientRequestStore: Send + Sync {
    /// Requests selected by `filter`, ordered by id
    fn list(
        &self,
        filter: RequestFilter,
    ) -> impl Future<Output = StoreResult<Vec<PatientRequest>>> + Send;

    /// A single request by id
    fn get(&self, id: RequestId)
    -> impl Future<Output = StoreResult<Option<PatientRequest>>> + Send;

    /// Reserve the identifier for a new record
    fn next_id(&self) -> impl Future<Output = StoreResult<RequestId>> + Send;

    /// Insert or replace a request
    fn insert(&self, request: PatientRequest) -> impl Future<Output = StoreResult<()>> + Send;

    /// Change a request's status and return the updated record
    fn set_status(
        &self,
        id: RequestId,
        status: RequestStatus,
    ) -> impl Future<Output = StoreResult<PatientRequest>> + Send;
}

impl<T: DonorStore> DonorStore for Arc<T> {
    fn find(&self, filter: &Expr) -> impl Future<Output = StoreResult<Vec<Donor>>> + Send {
        (**self).find(filter)
    }

    fn get(&self, id: DonorId) -> impl Future<Output = StoreResult<Option<Donor>>> + Send {
        (**self).get(id)
    }

    fn find_by_user(&self, user: UserId)
    -> impl Future<Output = StoreResult<Option<Donor>>> + Send {
        (**self).find_by_user(user)
    }

    fn next_id(&self) -> impl Future<Output = StoreResult<DonorId>> + Send {
        (**self).next_id()
    }

    fn insert(&self, donor: Donor) -> impl Future<Output = StoreResult<()>> + Send {
        (**self).insert(donor)
    }

    fn update_availability(
        &self,
        id: DonorId,
        update: AvailabilityUpdate,
    ) -> impl Future<Output = StoreResult<Donor>> + Send {
        (**self).update_availability(id, update)
    }

    fn count(&self) -> impl Future<Output = StoreResult<usize>> + Send {
        (**self).count()
    }
}

impl<T: PatientRequestStore> PatientRequestStore for Arc<T> {
    fn list(
        &self,
        filter: RequestFilter,
    ) -> impl Future<Output = StoreResult<Vec<PatientRequest>>> + Send {
        (**self).list(filter)
    }

    fn get(&self, id: RequestId)
    -> impl Future<Output = StoreResult<Option<PatientRequest>>> + Send {
        (**self).get(id)
    }

    fn next_id(&self) -> impl Future<Output = StoreResult<RequestId>> + Send {
        (**self).next_id()
    }

    fn insert(&self, request: PatientRequest) -> impl Future<Output = StoreResult<()>> + Send {
        (**self).insert(request)
    }

    fn set_status(
        &self,
        id: RequestId,
        status: RequestStatus,
    ) -> impl Future<Output = StoreResult<PatientRequest>> + Send {
        (**self).set_status(id, status)
    }
}
