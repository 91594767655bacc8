//! E-mail verification codes
//!
//! Codes are six digits, scoped to one store instance and expire after a
//! fixed lifetime. A code is discarded after it is used, after it expires,
//! or once its attempts are exhausted. Delivering the code is the caller's job.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::config::LifeLinkConfig;
use crate::models::UserProfile;

/// Verification failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerificationError {
    /// The address is not a plausible e-mail address
    #[error("Valid email address is required")]
    InvalidEmail,

    /// No code was issued for the address, or it was already used
    #[error("No verification code found, request a new code")]
    NoCode,

    /// The code's lifetime has passed
    #[error("Verification code expired, request a new code")]
    Expired,

    /// Attempts exhausted
    #[error("Too many attempts, request a new code")]
    TooManyAttempts,

    /// Wrong code
    #[error("Invalid verification code, {remaining} attempts remaining")]
    Mismatch {
        /// Attempts left before the code is discarded
        remaining: u32,
    },
}

/// A freshly issued code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationCode {
    /// Normalised address the code was issued for
    pub email: String,
    /// Six-digit code
    pub code: String,
    /// Expiry time
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct PendingCode {
    code: String,
    expires_at: DateTime<Utc>,
    attempts: u32,
}

/// Time-bounded store of outstanding verification codes
#[derive(Debug)]
pub struct VerificationCodeStore {
    pending: Mutex<FxHashMap<String, PendingCode>>,
    ttl: chrono::Duration,
    max_attempts: u32,
}

impl VerificationCodeStore {
    /// Create a store with the given code lifetime and attempt limit
    #[must_use]
    pub fn new(ttl: Duration, max_attempts: u32) -> Self {
        Self {
            pending: Mutex::new(FxHashMap::default()),
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX),
            max_attempts,
        }
    }

    /// Create a store using the configured lifetime and attempt limit
    #[must_use]
    pub fn from_config(config: &LifeLinkConfig) -> Self {
        Self::new(config.verification_ttl, config.verification_max_attempts)
    }

    /// Issue a new code for `email`, replacing any outstanding one
    pub fn issue(&self, email: &str) -> Result<VerificationCode, VerificationError> {
        self.issue_at(email, Utc::now())
    }

    /// Issue a new code as of `now`
    pub fn issue_at(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<VerificationCode, VerificationError> {
        let email = normalize_email(email)?;
        let code = rand::rng().random_range(100_000..1_000_000u32).to_string();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        self.lock().insert(
            email.clone(),
            PendingCode {
                code: code.clone(),
                expires_at,
                attempts: 0,
            },
        );

        log::info!("Issued verification code for {email}, expires at {expires_at}");
        Ok(VerificationCode {
            email,
            code,
            expires_at,
        })
    }

    /// Check `code` for `email`
    pub fn verify(&self, email: &str, code: &str) -> Result<(), VerificationError> {
        self.verify_at(email, code, Utc::now())
    }

    /// Check `code` for `email` as of `now`
    pub fn verify_at(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<(), VerificationError> {
        let email = normalize_email(email)?;
        let mut pending = self.lock();

        let entry = pending.get_mut(&email).ok_or(VerificationError::NoCode)?;

        if now > entry.expires_at {
            pending.remove(&email);
            return Err(VerificationError::Expired);
        }

        if entry.attempts >= self.max_attempts {
            pending.remove(&email);
            return Err(VerificationError::TooManyAttempts);
        }

        if entry.code != code.trim() {
            entry.attempts += 1;
            return Err(VerificationError::Mismatch {
                remaining: self.max_attempts.saturating_sub(entry.attempts),
            });
        }

        pending.remove(&email);
        Ok(())
    }

    /// Check `code` against the user's address and mark the address verified
    pub fn verify_user(
        &self,
        user: &mut UserProfile,
        code: &str,
    ) -> Result<(), VerificationError> {
        self.verify(&user.email, code)?;
        user.is_email_verified = true;
        log::info!("Verified e-mail for user {}", user.id);
        Ok(())
    }

    /// Drop every code that has expired by `now`, returning how many were removed
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut pending = self.lock();
        let before = pending.len();
        pending.retain(|_, entry| entry.expires_at >= now);
        before - pending.len()
    }

    /// Number of outstanding codes
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no codes are outstanding
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FxHashMap<String, PendingCode>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Lowercase and trim an address, rejecting anything without `local@domain.tld`
fn normalize_email(raw: &str) -> Result<String, VerificationError> {
    let email = raw.trim().to_lowercase();
    let valid = !email.chars().any(char::is_whitespace)
        && email.split_once('@').is_some_and(|(local, domain)| {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        });

    if valid {
        Ok(email)
    } else {
        Err(VerificationError::InvalidEmail)
    }
}
