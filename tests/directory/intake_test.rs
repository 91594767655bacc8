use lifelink::models::{DonorRegistration, NewPatientRequest, RequestStatus};
use lifelink::{
    BloodType, DonorStore, InMemoryDonorStore, InMemoryRequestStore, LifeLinkError, MatchService,
    RequestFilter, RequestId, Urgency, fulfil_request, list_requests, register_donor,
    submit_request,
};

use crate::utils::{FailingStore, user_profile};

fn registration(blood_type: &str, age: i64) -> DonorRegistration {
    DonorRegistration {
        blood_type: blood_type.to_string(),
        phone: "555-0142".to_string(),
        address: "8 Quay Street".to_string(),
        age,
    }
}

fn new_request(blood_type: &str, urgency: Option<&str>) -> NewPatientRequest {
    NewPatientRequest {
        blood_type: blood_type.to_string(),
        phone: "555-0177".to_string(),
        hospital: "St. Mary's".to_string(),
        urgency: urgency.map(str::to_string),
    }
}

/// A registered donor is immediately matchable
#[tokio::test]
async fn test_registered_donor_is_matchable() -> lifelink::Result<()> {
    let store = InMemoryDonorStore::new();
    let user = user_profile(7);

    let donor = register_donor(&store, &user, registration("O-", 40)).await?;
    assert_eq!(donor.blood_type, BloodType::ONeg);
    assert_eq!(donor.user.email, "user7@example.org");
    assert!(donor.is_available);

    let service = MatchService::new(store);
    let result = service.find_matches(BloodType::AbNeg).await?;
    assert_eq!(result.total_donors, 1);
    assert_eq!(result.donors[0].id, donor.id);
    Ok(())
}

#[tokio::test]
async fn test_one_donor_profile_per_user() -> lifelink::Result<()> {
    let store = InMemoryDonorStore::new();
    let user = user_profile(7);

    register_donor(&store, &user, registration("A+", 30)).await?;
    let err = register_donor(&store, &user, registration("B+", 30))
        .await
        .unwrap_err();

    assert!(matches!(err, LifeLinkError::ValidationError(_)));
    assert_eq!(store.count().await.unwrap(), 1);
    Ok(())
}

#[tokio::test]
async fn test_registration_validation_stores_nothing() {
    let store = InMemoryDonorStore::new();
    let user = user_profile(3);

    let err = register_donor(&store, &user, registration("A+", 17))
        .await
        .unwrap_err();
    assert!(matches!(err, LifeLinkError::ValidationError(_)));

    let err = register_donor(&store, &user, registration("Q-", 30))
        .await
        .unwrap_err();
    assert!(matches!(err, LifeLinkError::InvalidBloodType(_)));

    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_registration_store_outage() {
    let err = register_donor(&FailingStore::default(), &user_profile(1), registration("A+", 30))
        .await
        .unwrap_err();
    assert!(matches!(err, LifeLinkError::StoreUnavailable(_)));
}

#[tokio::test]
async fn test_request_defaults_and_lifecycle() -> lifelink::Result<()> {
    let store = InMemoryRequestStore::new();
    let patient = user_profile(11);

    let first = submit_request(&store, &patient, new_request("AB+", None)).await?;
    assert_eq!(first.urgency, Urgency::Medium);
    assert_eq!(first.status, RequestStatus::Pending);
    assert_eq!(first.blood_type, BloodType::AbPos);

    let second = submit_request(&store, &patient, new_request("O-", Some("high"))).await?;
    assert_eq!(second.urgency, Urgency::High);
    assert_ne!(first.id, second.id);

    let fulfilled = fulfil_request(&store, first.id).await?;
    assert_eq!(fulfilled.status, RequestStatus::Fulfilled);

    let pending = list_requests(&store, RequestFilter::pending()).await?;
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, second.id);

    let all = list_requests(&store, RequestFilter::all()).await?;
    assert_eq!(all.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_request_validation() {
    let store = InMemoryRequestStore::new();
    let patient = user_profile(11);

    let err = submit_request(&store, &patient, new_request("AB+", Some("critical")))
        .await
        .unwrap_err();
    assert!(matches!(err, LifeLinkError::ValidationError(_)));

    let mut missing_hospital = new_request("AB+", None);
    missing_hospital.hospital = "  ".to_string();
    let err = submit_request(&store, &patient, missing_hospital)
        .await
        .unwrap_err();
    assert!(matches!(err, LifeLinkError::ValidationError(_)));

    assert!(list_requests(&store, RequestFilter::all()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_fulfil_unknown_request() {
    let store = InMemoryRequestStore::new();
    let err = fulfil_request(&store, RequestId(404)).await.unwrap_err();
    assert!(matches!(err, LifeLinkError::NotFound(_)));
}
