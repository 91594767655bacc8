//! Matching over the pending request queue
//!
//! Pending requests are handled in priority order: higher urgency first,
//! then the oldest request. Batch runs fan out over a bounded number of
//! concurrent matches and reassemble the results in that same order.

use std::cmp::Reverse;
use std::time::Instant;

use futures::stream::{self, StreamExt};
use itertools::Itertools;
use log::info;

use crate::blood::{self, BloodType};
use crate::config::LifeLinkConfig;
use crate::error::{LifeLinkError, Result};
use crate::matching::result::RequestMatch;
use crate::matching::service::MatchService;
use crate::models::PatientRequest;
use crate::store::{DonorStore, PatientRequestStore, RequestFilter};

/// Sort requests so the most urgent, then oldest, come first
pub fn sort_by_priority(requests: Vec<PatientRequest>) -> Vec<PatientRequest> {
    requests
        .into_iter()
        .sorted_by_key(|request| (Reverse(request.urgency), request.created_at, request.id))
        .collect()
}

/// Pairs the donor matching service with the patient request queue
#[derive(Debug)]
pub struct RequestMatcher<D, R> {
    service: MatchService<D>,
    requests: R,
    concurrency: usize,
}

impl<D: DonorStore, R: PatientRequestStore> RequestMatcher<D, R> {
    /// Create a matcher using the given configuration
    #[must_use]
    pub fn new(service: MatchService<D>, requests: R, config: &LifeLinkConfig) -> Self {
        Self {
            service,
            requests,
            concurrency: config.batch_concurrency.max(1),
        }
    }

    /// The donor matching service
    #[must_use]
    pub const fn service(&self) -> &MatchService<D> {
        &self.service
    }

    /// Pending requests a donor of `donor_type` could help, in priority order
    pub async fn find_requests_for_donor(
        &self,
        donor_type: BloodType,
    ) -> Result<Vec<PatientRequest>> {
        let recipients = blood::patients_compatible_with_donor(donor_type);
        let pending = self
            .pending(RequestFilter::pending().with_blood_types(recipients))
            .await?;
        Ok(sort_by_priority(pending))
    }

    /// Match every pending request against the current donor pool
    ///
    /// At most `batch_concurrency` matches run at once. The first failure
    /// aborts the run.
    pub async fn match_pending_requests(&self) -> Result<Vec<RequestMatch>> {
        let start_time = Instant::now();
        let pending = sort_by_priority(self.pending(RequestFilter::pending()).await?);

        info!(
            "Matching {} pending requests with concurrency {}",
            pending.len(),
            self.concurrency
        );

        let mut outcomes = stream::iter(pending.into_iter().enumerate())
            .map(|(position, request)| async move {
                let outcome = self.service.find_matches(request.blood_type).await;
                (position, outcome.map(|result| RequestMatch { request, result }))
            })
            .buffer_unordered(self.concurrency)
            .collect::<Vec<_>>()
            .await;

        outcomes.sort_unstable_by_key(|(position, _)| *position);
        let matches = outcomes
            .into_iter()
            .map(|(_, outcome)| outcome)
            .collect::<Result<Vec<_>>>()?;

        let unmatched = matches.iter().filter(|m| m.result.is_empty()).count();
        info!(
            "Matched {} requests in {:.2?} ({} without an available donor)",
            matches.len(),
            start_time.elapsed(),
            unmatched
        );

        Ok(matches)
    }

    async fn pending(&self, filter: RequestFilter) -> Result<Vec<PatientRequest>> {
        self.requests
            .list(filter)
            .await
            .map_err(LifeLinkError::StoreUnavailable)
    }
}
