use lifelink::blood::{
    donors_compatible_with_patient_symbol, is_compatible_symbol,
    patients_compatible_with_donor_symbol,
};
use lifelink::{BloodType, BloodTypeSet, CompatibilityTable, LifeLinkError};

fn set(types: &[BloodType]) -> BloodTypeSet {
    types.iter().copied().collect()
}

/// The generated table reproduces the reference donor -> recipient values
#[test]
fn test_reference_table_values() {
    use BloodType::*;
    let table = CompatibilityTable::global();

    let expected = [
        (ONeg, BloodTypeSet::FULL),
        (OPos, set(&[OPos, APos, BPos, AbPos])),
        (ANeg, set(&[ANeg, APos, AbNeg, AbPos])),
        (APos, set(&[APos, AbPos])),
        (BNeg, set(&[BNeg, BPos, AbNeg, AbPos])),
        (BPos, set(&[BPos, AbPos])),
        (AbNeg, set(&[AbNeg, AbPos])),
        (AbPos, set(&[AbPos])),
    ];

    for (donor, recipients) in expected {
        assert_eq!(table.can_donate_to(donor), recipients, "donor {donor}");
    }
}

#[test]
fn test_universal_donor_and_recipient() {
    let table = CompatibilityTable::global();
    assert_eq!(table.can_donate_to(BloodType::ONeg), BloodTypeSet::FULL);
    assert_eq!(table.can_receive_from(BloodType::AbPos), BloodTypeSet::FULL);
}

#[test]
fn test_minimal_donor_and_recipient() {
    let table = CompatibilityTable::global();
    assert_eq!(
        table.can_receive_from(BloodType::ONeg),
        BloodTypeSet::singleton(BloodType::ONeg)
    );
    assert_eq!(
        table.can_donate_to(BloodType::AbPos),
        BloodTypeSet::singleton(BloodType::AbPos)
    );
}

#[test]
fn test_global_table_verifies() {
    assert_eq!(CompatibilityTable::global().verify(), Ok(()));
}

/// Compatible donor types for an A+ patient, in canonical order
#[test]
fn test_donor_types_for_a_positive_are_ordered() {
    let donors = donors_compatible_with_patient_symbol("A+").unwrap();
    let symbols: Vec<&str> = donors.iter().map(BloodType::symbol).collect();
    assert_eq!(symbols, ["O-", "O+", "A-", "A+"]);
}

#[test]
fn test_symbol_lookups_reject_unknown_types() {
    for raw in ["XYZ", "", "AB", "C+"] {
        assert!(matches!(
            donors_compatible_with_patient_symbol(raw),
            Err(LifeLinkError::InvalidBloodType(_))
        ));
        assert!(matches!(
            patients_compatible_with_donor_symbol(raw),
            Err(LifeLinkError::InvalidBloodType(_))
        ));
        assert!(matches!(
            is_compatible_symbol(raw, "O+"),
            Err(LifeLinkError::InvalidBloodType(_))
        ));
        assert!(matches!(
            is_compatible_symbol("O+", raw),
            Err(LifeLinkError::InvalidBloodType(_))
        ));
    }
}

#[test]
fn test_is_compatible_symbol() {
    assert!(is_compatible_symbol("O-", "AB+").unwrap());
    assert!(!is_compatible_symbol("AB+", "O-").unwrap());
    assert!(is_compatible_symbol("B-", "AB-").unwrap());
    assert!(!is_compatible_symbol("A+", "B+").unwrap());
}

#[test]
fn test_invalid_blood_type_is_client_error() {
    let err = donors_compatible_with_patient_symbol("XYZ").unwrap_err();
    assert!(err.is_client_error());
    assert_eq!(err.status_code(), 400);
}
