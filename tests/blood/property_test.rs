use lifelink::{
    BloodType, BloodTypeSet, CompatibilityTable, donors_compatible_with_patient, is_compatible,
    patients_compatible_with_donor,
};
use proptest::prelude::*;

fn blood_type() -> impl Strategy<Value = BloodType> {
    prop::sample::select(BloodType::ALL.to_vec())
}

fn blood_type_set() -> impl Strategy<Value = BloodTypeSet> {
    prop::collection::vec(blood_type(), 0..8).prop_map(|types| types.into_iter().collect())
}

proptest! {
    /// A donor can give to a patient exactly when the patient can receive from the donor
    #[test]
    fn inverse_consistency(donor in blood_type(), patient in blood_type()) {
        let table = CompatibilityTable::global();
        prop_assert_eq!(
            table.can_donate_to(donor).contains(patient),
            table.can_receive_from(patient).contains(donor)
        );
    }

    /// Every type is compatible with itself in both directions
    #[test]
    fn reflexivity(t in blood_type()) {
        let table = CompatibilityTable::global();
        prop_assert!(table.can_donate_to(t).contains(t));
        prop_assert!(table.can_receive_from(t).contains(t));
    }

    /// Neither relation is ever empty for a valid type
    #[test]
    fn non_empty(t in blood_type()) {
        prop_assert!(!donors_compatible_with_patient(t).is_empty());
        prop_assert!(!patients_compatible_with_donor(t).is_empty());
    }

    /// The membership test agrees with both relations
    #[test]
    fn is_compatible_agrees_with_relations(donor in blood_type(), patient in blood_type()) {
        let forward = patients_compatible_with_donor(donor).contains(patient);
        let backward = donors_compatible_with_patient(patient).contains(donor);
        prop_assert_eq!(is_compatible(donor, patient), forward);
        prop_assert_eq!(forward, backward);
    }

    /// Only the exact canonical symbol parses; padded or lowercased forms are rejected
    #[test]
    fn symbol_parsing_is_exact(t in blood_type(), pad in 1usize..3, lower in any::<bool>()) {
        prop_assert_eq!(BloodType::parse(t.symbol()).unwrap(), t);

        let core = if lower { t.symbol().to_lowercase() } else { t.symbol().to_string() };
        let padded = format!("{}{}", " ".repeat(pad), core);
        prop_assert!(BloodType::parse(&padded).is_err());
        let trailing = format!("{core}{}", " ".repeat(pad));
        prop_assert!(BloodType::parse(&trailing).is_err());
        prop_assert!(BloodType::parse(&t.symbol().to_lowercase()).is_err());
    }

    /// Deriving the inverse from any donor relation yields a consistent pair
    #[test]
    fn derived_inverse_is_consistent(rows in prop::collection::vec(blood_type_set(), 8)) {
        let mut donate_to = [BloodTypeSet::EMPTY; 8];
        for (slot, row) in donate_to.iter_mut().zip(rows) {
            *slot = row;
        }
        let table = CompatibilityTable::from_donor_relation(donate_to);

        for donor in BloodType::ALL {
            for patient in BloodType::ALL {
                prop_assert_eq!(
                    table.can_donate_to(donor).contains(patient),
                    table.can_receive_from(patient).contains(donor)
                );
            }
        }
    }
}
