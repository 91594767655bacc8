//! A Rust library for matching blood donors with patients, built around a
//! verified ABO/Rh compatibility table and pluggable async stores.

pub mod availability;
pub mod blood;
pub mod config;
pub mod error;
pub mod intake;
pub mod matching;
pub mod models;
pub mod statistics;
pub mod store;
pub mod verification;

// Re-export the most common types for easier use
// Core types
pub use config::{LifeLinkConfig, LifeLinkConfigBuilder};
pub use error::{LifeLinkError, Result, StoreError};

// Compatibility
pub use blood::{
    BloodType, BloodTypeSet, CompatibilityTable, donors_compatible_with_patient, is_compatible,
    patients_compatible_with_donor,
};

// Matching
pub use matching::{DonorSummary, MatchResult, MatchService, RequestMatch, RequestMatcher};

// Records and stores
pub use models::{Donor, DonorId, PatientRequest, RequestId, Urgency, UserProfile};
pub use store::{
    DonorStore, Expr, InMemoryDonorStore, InMemoryRequestStore, PatientRequestStore,
    RequestFilter,
};

// Supporting services
pub use availability::{EligibilityPolicy, record_donation, set_availability};
pub use intake::{fulfil_request, list_requests, register_donor, submit_request};
pub use statistics::DirectoryStats;
pub use verification::{VerificationCodeStore, VerificationError};
