//! User account references
//!
//! Accounts are owned by an external user store. Donor and patient records
//! only carry the display fields that store joins in.

use serde::{Deserialize, Serialize};

use crate::models::types::UserId;

/// Account as seen by this crate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Account identifier
    pub id: UserId,
    /// Display name
    pub name: String,
    /// Contact e-mail
    pub email: String,
    /// Whether the e-mail address has been verified
    #[serde(default)]
    pub is_email_verified: bool,
}

impl UserProfile {
    /// Display fields joined onto donor records
    #[must_use]
    pub fn to_user_ref(&self) -> UserRef {
        UserRef {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Owning user's identity with denormalised display fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    /// Account identifier
    pub id: UserId,
    /// Display name
    pub name: String,
    /// Contact e-mail
    pub email: String,
}
