//! Donor registration and patient request intake

use log::info;

use crate::error::{LifeLinkError, Result};
use crate::models::{
    Donor, DonorRegistration, NewPatientRequest, PatientRequest, RequestId, RequestStatus,
    UserProfile,
};
use crate::store::{DonorStore, PatientRequestStore, RequestFilter};

/// Register `user` as a donor
///
/// A user owns at most one donor profile.
pub async fn register_donor<S: DonorStore>(
    store: &S,
    user: &UserProfile,
    registration: DonorRegistration,
) -> Result<Donor> {
    let existing = store
        .find_by_user(user.id)
        .await
        .map_err(LifeLinkError::from_store)?;
    if existing.is_some() {
        return Err(LifeLinkError::ValidationError(format!(
            "user {} is already registered as a donor",
            user.id
        )));
    }

    let id = store.next_id().await.map_err(LifeLinkError::from_store)?;
    let donor = registration.into_donor(id, user.to_user_ref())?;
    store
        .insert(donor.clone())
        .await
        .map_err(LifeLinkError::from_store)?;

    info!("Registered donor {} ({}) for user {}", donor.id, donor.blood_type, user.id);
    Ok(donor)
}

/// Submit a new blood request for `user`
pub async fn submit_request<R: PatientRequestStore>(
    store: &R,
    user: &UserProfile,
    input: NewPatientRequest,
) -> Result<PatientRequest> {
    let id = store.next_id().await.map_err(LifeLinkError::from_store)?;
    let request = input.into_request(id, user.to_user_ref())?;
    store
        .insert(request.clone())
        .await
        .map_err(LifeLinkError::from_store)?;

    info!(
        "Submitted {} urgency request {} for {} at {}",
        request.urgency, request.id, request.blood_type, request.hospital
    );
    Ok(request)
}

/// Requests selected by `filter`, ordered by id
pub async fn list_requests<R: PatientRequestStore>(
    store: &R,
    filter: RequestFilter,
) -> Result<Vec<PatientRequest>> {
    store.list(filter).await.map_err(LifeLinkError::from_store)
}

/// Mark a request fulfilled
///
/// Fulfilling an already fulfilled request is a no-op.
pub async fn fulfil_request<R: PatientRequestStore>(
    store: &R,
    id: RequestId,
) -> Result<PatientRequest> {
    let request = store
        .set_status(id, RequestStatus::Fulfilled)
        .await
        .map_err(LifeLinkError::from_store)?;

    info!("Request {id} fulfilled");
    Ok(request)
}
