//! Donor matching
//!
//! This module contains the matching service, which finds available donors
//! compatible with a patient, and the request matcher, which runs it over
//! the queue of pending patient requests.

pub mod requests;
pub mod result;
pub mod service;

pub use requests::{RequestMatcher, sort_by_priority};
pub use result::{DonorSummary, MatchResult, RequestMatch};
pub use service::MatchService;
