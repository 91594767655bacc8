use chrono::{Duration, Utc};
use lifelink::{
    BloodType, DonorId, DonorStore, InMemoryDonorStore, LifeLinkError, record_donation,
    set_availability,
};

use crate::utils::{FailingStore, donor, scenario_donors};

#[tokio::test]
async fn test_set_availability_updates_record() -> lifelink::Result<()> {
    let store = InMemoryDonorStore::from_donors(scenario_donors());

    let updated = set_availability(&store, DonorId(2), false).await?;
    assert!(!updated.is_available);

    let stored = store.get(DonorId(2)).await.unwrap().unwrap();
    assert!(!stored.is_available);
    Ok(())
}

#[tokio::test]
async fn test_unknown_donor_is_not_found() {
    let store = InMemoryDonorStore::new();

    let err = set_availability(&store, DonorId(42), true).await.unwrap_err();

    assert!(matches!(err, LifeLinkError::NotFound(ref what) if what == "donor 42"));
    assert_eq!(err.status_code(), 404);
}

#[tokio::test]
async fn test_store_outage_is_unavailable() {
    let err = set_availability(&FailingStore::default(), DonorId(1), true)
        .await
        .unwrap_err();
    assert!(matches!(err, LifeLinkError::StoreUnavailable(_)));
}

#[tokio::test]
async fn test_record_donation_keeps_availability() -> lifelink::Result<()> {
    let store = InMemoryDonorStore::from_donors(vec![donor(1, BloodType::OPos, true)]);
    let at = Utc::now() - Duration::hours(2);

    let updated = record_donation(&store, DonorId(1), at).await?;

    assert_eq!(updated.last_donation, Some(at));
    assert!(updated.is_available);
    Ok(())
}

#[tokio::test]
async fn test_record_donation_rejects_future_time() {
    let store = InMemoryDonorStore::from_donors(vec![donor(1, BloodType::OPos, true)]);

    let err = record_donation(&store, DonorId(1), Utc::now() + Duration::days(1))
        .await
        .unwrap_err();

    assert!(matches!(err, LifeLinkError::ValidationError(_)));
    let stored = store.get(DonorId(1)).await.unwrap().unwrap();
    assert_eq!(stored.last_donation, None);
}
