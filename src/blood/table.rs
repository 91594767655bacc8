//! Static ABO/Rh compatibility table
//!
//! Both directions are generated from one rule: a donor may give to a
//! patient when every red cell antigen the donor carries (A, B, RhD) is also
//! carried by the patient. `can_receive_from` is then built as the exact
//! inverse of `can_donate_to`, so the two relations cannot drift apart.

use std::sync::LazyLock;

use crate::blood::types::{BloodType, BloodTypeSet};
use crate::error::Result;

/// Process-wide compatibility table, built once on first use
static TABLE: LazyLock<CompatibilityTable> = LazyLock::new(CompatibilityTable::from_abo_rh_rules);

/// Both compatibility relations indexed by canonical blood type position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatibilityTable {
    /// donor type -> patient types that may receive from it
    donate_to: [BloodTypeSet; 8],
    /// patient type -> donor types it may receive from
    receive_from: [BloodTypeSet; 8],
}

/// A structural defect found by [`CompatibilityTable::verify`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableDefect {
    /// `patient in can_donate_to(donor)` disagrees with `donor in can_receive_from(patient)`
    Asymmetric {
        /// Donor side of the pair
        donor: BloodType,
        /// Patient side of the pair
        patient: BloodType,
    },
    /// A type is not compatible with itself
    NotReflexive(BloodType),
    /// A type has no compatible counterpart in one direction
    Empty(BloodType),
}

impl CompatibilityTable {
    /// Shared, immutable instance
    #[must_use]
    pub fn global() -> &'static Self {
        &TABLE
    }

    /// Build both relations from the antigen subset rule
    #[must_use]
    pub fn from_abo_rh_rules() -> Self {
        let mut donate_to = [BloodTypeSet::EMPTY; 8];
        for donor in BloodType::ALL {
            donate_to[donor.index()] = BloodType::ALL
                .into_iter()
                .filter(|patient| donor.antigens() & !patient.antigens() == 0)
                .collect();
        }

        let table = Self::from_donor_relation(donate_to);
        debug_assert_eq!(table.verify(), Ok(()));
        table
    }

    /// Build a table from a donor -> recipients relation, deriving the inverse
    #[must_use]
    pub fn from_donor_relation(donate_to: [BloodTypeSet; 8]) -> Self {
        let mut receive_from = [BloodTypeSet::EMPTY; 8];
        for donor in BloodType::ALL {
            for patient in donate_to[donor.index()].iter() {
                receive_from[patient.index()].insert(donor);
            }
        }

        Self {
            donate_to,
            receive_from,
        }
    }

    /// Patient types that may receive blood from `donor`
    #[must_use]
    pub const fn can_donate_to(&self, donor: BloodType) -> BloodTypeSet {
        self.donate_to[donor.index()]
    }

    /// Donor types whose blood `patient` may receive
    #[must_use]
    pub const fn can_receive_from(&self, patient: BloodType) -> BloodTypeSet {
        self.receive_from[patient.index()]
    }

    /// [`Self::can_donate_to`] for a raw symbol
    pub fn can_donate_to_symbol(&self, donor: &str) -> Result<BloodTypeSet> {
        Ok(self.can_donate_to(donor.parse()?))
    }

    /// [`Self::can_receive_from`] for a raw symbol
    pub fn can_receive_from_symbol(&self, patient: &str) -> Result<BloodTypeSet> {
        Ok(self.can_receive_from(patient.parse()?))
    }

    /// Check inverse consistency, reflexivity and non-emptiness for all 64 pairs
    pub fn verify(&self) -> std::result::Result<(), TableDefect> {
        for donor in BloodType::ALL {
            for patient in BloodType::ALL {
                let forward = self.can_donate_to(donor).contains(patient);
                let backward = self.can_receive_from(patient).contains(donor);
                if forward != backward {
                    return Err(TableDefect::Asymmetric { donor, patient });
                }
            }
        }

        for blood_type in BloodType::ALL {
            if self.can_donate_to(blood_type).is_empty()
                || self.can_receive_from(blood_type).is_empty()
            {
                return Err(TableDefect::Empty(blood_type));
            }
            if !self.can_donate_to(blood_type).contains(blood_type)
                || !self.can_receive_from(blood_type).contains(blood_type)
            {
                return Err(TableDefect::NotReflexive(blood_type));
            }
        }

        Ok(())
    }
}

impl Default for CompatibilityTable {
    fn default() -> Self {
        Self::from_abo_rh_rules()
    }
}
