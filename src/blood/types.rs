//! Blood type values and compact sets of them
//!
//! `BloodType` is restricted to the eight ABO/Rh combinations. Parsing any
//! other symbol is an error, never a silently accepted value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::LifeLinkError;

/// One of the eight ABO/Rh blood types
///
/// Variants are declared in canonical order (`O-, O+, A-, A+, B-, B+, AB-, AB+`),
/// which is also the derived `Ord` and the iteration order of [`BloodTypeSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BloodType {
    /// O Rh negative
    ONeg,
    /// O Rh positive
    OPos,
    /// A Rh negative
    ANeg,
    /// A Rh positive
    APos,
    /// B Rh negative
    BNeg,
    /// B Rh positive
    BPos,
    /// AB Rh negative
    AbNeg,
    /// AB Rh positive
    AbPos,
}

/// A antigen bit
const ANTIGEN_A: u8 = 0b001;
/// B antigen bit
const ANTIGEN_B: u8 = 0b010;
/// RhD antigen bit
const ANTIGEN_RH: u8 = 0b100;

impl BloodType {
    /// All blood types in canonical order
    pub const ALL: [Self; 8] = [
        Self::ONeg,
        Self::OPos,
        Self::ANeg,
        Self::APos,
        Self::BNeg,
        Self::BPos,
        Self::AbNeg,
        Self::AbPos,
    ];

    /// Canonical symbol, e.g. `"AB+"`
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::ONeg => "O-",
            Self::OPos => "O+",
            Self::ANeg => "A-",
            Self::APos => "A+",
            Self::BNeg => "B-",
            Self::BPos => "B+",
            Self::AbNeg => "AB-",
            Self::AbPos => "AB+",
        }
    }

    /// Position in canonical order
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Red cell antigens carried by this type, as a bit mask of A, B and RhD
    #[must_use]
    pub const fn antigens(self) -> u8 {
        match self {
            Self::ONeg => 0,
            Self::OPos => ANTIGEN_RH,
            Self::ANeg => ANTIGEN_A,
            Self::APos => ANTIGEN_A | ANTIGEN_RH,
            Self::BNeg => ANTIGEN_B,
            Self::BPos => ANTIGEN_B | ANTIGEN_RH,
            Self::AbNeg => ANTIGEN_A | ANTIGEN_B,
            Self::AbPos => ANTIGEN_A | ANTIGEN_B | ANTIGEN_RH,
        }
    }

    /// Whether the type carries the RhD antigen
    #[must_use]
    pub const fn is_rh_positive(self) -> bool {
        self.antigens() & ANTIGEN_RH != 0
    }

    /// Parse one of the eight canonical symbols, exactly as written
    pub fn parse(raw: &str) -> Result<Self, LifeLinkError> {
        raw.parse()
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for BloodType {
    type Err = LifeLinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "O-" => Ok(Self::ONeg),
            "O+" => Ok(Self::OPos),
            "A-" => Ok(Self::ANeg),
            "A+" => Ok(Self::APos),
            "B-" => Ok(Self::BNeg),
            "B+" => Ok(Self::BPos),
            "AB-" => Ok(Self::AbNeg),
            "AB+" => Ok(Self::AbPos),
            _ => Err(LifeLinkError::InvalidBloodType(s.to_string())),
        }
    }
}

impl Serialize for BloodType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

impl<'de> Deserialize<'de> for BloodType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A set of blood types stored as an 8-bit mask
///
/// Iteration always yields members in canonical order, so two equal sets
/// render identically.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BloodTypeSet(u8);

impl BloodTypeSet {
    /// The empty set
    pub const EMPTY: Self = Self(0);
    /// All eight blood types
    pub const FULL: Self = Self(u8::MAX);

    /// Create an empty set
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Set containing a single type
    #[must_use]
    pub const fn singleton(blood_type: BloodType) -> Self {
        Self(1 << blood_type.index())
    }

    /// Add a type to the set
    pub fn insert(&mut self, blood_type: BloodType) {
        self.0 |= 1 << blood_type.index();
    }

    /// Membership test
    #[must_use]
    pub const fn contains(self, blood_type: BloodType) -> bool {
        self.0 & (1 << blood_type.index()) != 0
    }

    /// Number of members
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether the set has no members
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether every member of `self` is also in `other`
    #[must_use]
    pub const fn is_subset(self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }

    /// Members in canonical order
    pub fn iter(self) -> impl Iterator<Item = BloodType> {
        BloodType::ALL.into_iter().filter(move |t| self.contains(*t))
    }

    /// Members in canonical order, collected
    #[must_use]
    pub fn to_vec(self) -> Vec<BloodType> {
        self.iter().collect()
    }
}

impl FromIterator<BloodType> for BloodTypeSet {
    fn from_iter<I: IntoIterator<Item = BloodType>>(iter: I) -> Self {
        let mut set = Self::new();
        for blood_type in iter {
            set.insert(blood_type);
        }
        set
    }
}

impl fmt::Debug for BloodTypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(BloodType::symbol)).finish()
    }
}

impl Serialize for BloodTypeSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for BloodTypeSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let members = Vec::<BloodType>::deserialize(deserializer)?;
        Ok(members.into_iter().collect())
    }
}
