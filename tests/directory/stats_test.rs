use lifelink::{BloodType, DirectoryStats, InMemoryDonorStore, InMemoryRequestStore, Urgency};

use crate::utils::{FailingRequestStore, donor, request, scenario_donors};

#[tokio::test]
async fn test_collect_counts() -> lifelink::Result<()> {
    let mut donors = scenario_donors();
    donors.push(donor(4, BloodType::APos, true));
    let donors = InMemoryDonorStore::from_donors(donors);

    let mut fulfilled = request(3, BloodType::OPos, Urgency::High, 5);
    fulfilled.status = lifelink::models::RequestStatus::Fulfilled;
    let requests = InMemoryRequestStore::from_requests(vec![
        request(1, BloodType::APos, Urgency::High, 30),
        request(2, BloodType::BNeg, Urgency::Low, 20),
        fulfilled,
    ]);

    let stats = DirectoryStats::collect(&donors, &requests).await?;

    assert_eq!(stats.total_donors, 4);
    assert_eq!(stats.available_donors, 3);
    assert_eq!(stats.available_by_blood_type.get(&BloodType::APos), Some(&2));
    assert_eq!(stats.available_by_blood_type.get(&BloodType::ONeg), Some(&1));
    assert_eq!(stats.available_by_blood_type.get(&BloodType::BPos), None);
    assert_eq!(stats.total_requests, 3);
    assert_eq!(stats.pending_requests, 2);
    assert_eq!(stats.pending_by_urgency.get(&Urgency::High), Some(&1));
    assert_eq!(stats.pending_by_urgency.get(&Urgency::Low), Some(&1));

    let summary = stats.summary();
    assert!(summary.contains("Available Donors: 3"));
    assert!(summary.contains("A+: 2"));
    assert!(summary.contains("Pending Requests: 2"));

    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["availableByBloodType"]["A+"], 2);
    assert_eq!(json["pendingByUrgency"]["high"], 1);
    Ok(())
}

#[tokio::test]
async fn test_empty_directory() -> lifelink::Result<()> {
    let stats = DirectoryStats::collect(&InMemoryDonorStore::new(), &InMemoryRequestStore::new()).await?;
    assert_eq!(stats, DirectoryStats::default());
    Ok(())
}

#[tokio::test]
async fn test_store_outage() {
    let err = DirectoryStats::collect(&InMemoryDonorStore::new(), &FailingRequestStore)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("unavailable"));
}
