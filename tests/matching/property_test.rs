use lifelink::{
    BloodType, DonorId, InMemoryDonorStore, MatchService, is_compatible,
};
use proptest::prelude::*;

use crate::utils::donor;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn population() -> impl Strategy<Value = Vec<(BloodType, bool)>> {
    prop::collection::vec(
        (prop::sample::select(BloodType::ALL.to_vec()), any::<bool>()),
        0..60,
    )
}

proptest! {
    /// Matched donors are exactly the available donors of a compatible type
    #[test]
    fn matches_are_the_filter_conjunction(
        people in population(),
        requested in prop::sample::select(BloodType::ALL.to_vec()),
        parallel_threshold in 1usize..100,
    ) {
        let donors: Vec<_> = people
            .iter()
            .enumerate()
            .map(|(i, (blood_type, available))| donor(i as u64 + 1, *blood_type, *available))
            .collect();
        let expected: Vec<DonorId> = donors
            .iter()
            .filter(|d| d.is_available && is_compatible(d.blood_type, requested))
            .map(|d| d.id)
            .collect();

        let store = InMemoryDonorStore::from_donors(donors).with_parallel_threshold(parallel_threshold);
        let service = MatchService::new(store);
        let result = runtime().block_on(service.find_matches(requested)).unwrap();

        let actual: Vec<DonorId> = result.donors.iter().map(|d| d.id).collect();
        prop_assert_eq!(actual, expected);
        prop_assert_eq!(result.total_donors, result.donors.len());
        prop_assert!(result.donors.iter().all(|d| d.is_available));
        prop_assert!(result
            .donors
            .iter()
            .all(|d| result.compatible_blood_types.contains(d.blood_type)));
    }

    /// Repeating a match without store changes gives the same result
    #[test]
    fn find_matches_is_idempotent(
        people in population(),
        requested in prop::sample::select(BloodType::ALL.to_vec()),
    ) {
        let donors = people
            .iter()
            .enumerate()
            .map(|(i, (blood_type, available))| donor(i as u64 + 1, *blood_type, *available))
            .collect();
        let service = MatchService::new(InMemoryDonorStore::from_donors(donors));

        let rt = runtime();
        let first = rt.block_on(service.find_matches(requested)).unwrap();
        let second = rt.block_on(service.find_matches(requested)).unwrap();
        prop_assert_eq!(first, second);
    }
}
