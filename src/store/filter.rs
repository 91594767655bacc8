//! Expression-based filtering for donor records
//!
//! Stores receive an [`Expr`] and return the donors it selects. The in-memory
//! store evaluates it directly; a database-backed store would translate it
//! into its own query language.

use chrono::{DateTime, Utc};

use crate::blood::{BloodType, BloodTypeSet};
use crate::models::Donor;

/// Donor fields an expression can refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DonorField {
    /// Blood type
    BloodType,
    /// Availability flag
    IsAvailable,
    /// Last donation time, null when the donor never donated
    LastDonation,
}

/// Represents a literal value that can be used in filter expressions
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// Boolean value
    Boolean(bool),

    /// Blood type value
    BloodType(BloodType),

    /// Timestamp value
    Timestamp(DateTime<Utc>),

    /// Null value
    Null,
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<BloodType> for LiteralValue {
    fn from(value: BloodType) -> Self {
        Self::BloodType(value)
    }
}

impl From<DateTime<Utc>> for LiteralValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

/// Represents a filter expression over donor records
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Field equals a literal value
    Eq(DonorField, LiteralValue),

    /// Timestamp field is at or before a literal time; null never matches
    LtEq(DonorField, LiteralValue),

    /// Field is in a set of values
    In(DonorField, Vec<LiteralValue>),

    /// Field is null
    IsNull(DonorField),

    /// Logical AND of expressions
    And(Vec<Expr>),

    /// Logical OR of expressions
    Or(Vec<Expr>),

    /// Always evaluates to true
    AlwaysTrue,
}

impl Expr {
    /// Available donors whose blood type is in `blood_types`
    #[must_use]
    pub fn available_with_types(blood_types: BloodTypeSet) -> Self {
        Self::And(vec![
            Self::blood_type_in(blood_types),
            Self::Eq(DonorField::IsAvailable, LiteralValue::Boolean(true)),
        ])
    }

    /// Donors whose blood type is in `blood_types`
    #[must_use]
    pub fn blood_type_in(blood_types: BloodTypeSet) -> Self {
        Self::In(
            DonorField::BloodType,
            blood_types.iter().map(LiteralValue::BloodType).collect(),
        )
    }

    /// Evaluate the expression against a single donor
    #[must_use]
    pub fn evaluate(&self, donor: &Donor) -> bool {
        match self {
            Self::AlwaysTrue => true,
            Self::And(exprs) => exprs.iter().all(|expr| expr.evaluate(donor)),
            Self::Or(exprs) => exprs.iter().any(|expr| expr.evaluate(donor)),
            Self::Eq(field, value) => field_value(donor, *field) == *value,
            Self::LtEq(field, value) => match (field_value(donor, *field), value) {
                (LiteralValue::Timestamp(actual), LiteralValue::Timestamp(bound)) => {
                    actual <= *bound
                }
                _ => false,
            },
            Self::In(field, values) => {
                let actual = field_value(donor, *field);
                values.iter().any(|value| *value == actual)
            }
            Self::IsNull(field) => field_value(donor, *field) == LiteralValue::Null,
        }
    }
}

/// Extract a field from a donor as a literal
fn field_value(donor: &Donor, field: DonorField) -> LiteralValue {
    match field {
        DonorField::BloodType => LiteralValue::BloodType(donor.blood_type),
        DonorField::IsAvailable => LiteralValue::Boolean(donor.is_available),
        DonorField::LastDonation => donor
            .last_donation
            .map_or(LiteralValue::Null, LiteralValue::Timestamp),
    }
}
