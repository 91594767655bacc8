//! Seed data loading
//!
//! A seed file is a JSON document with optional `donors` and `requests`
//! arrays, in the same shape the records serialize to.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LifeLinkError, StoreError};
use crate::models::{Donor, PatientRequest};
use crate::store::StoreResult;
use crate::store::memory::{InMemoryDonorStore, InMemoryRequestStore};

/// Contents of a seed file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedData {
    /// Donor records
    #[serde(default)]
    pub donors: Vec<Donor>,
    /// Patient requests
    #[serde(default)]
    pub requests: Vec<PatientRequest>,
}

impl SeedData {
    /// Parse seed data from a JSON string
    ///
    /// Records are held to the same field rules as registration and
    /// submission; the first offending record fails the whole load.
    pub fn from_json(json: &str) -> StoreResult<Self> {
        let seed: Self = serde_json::from_str(json)?;
        seed.validate()?;
        Ok(seed)
    }

    /// Check every record against the intake field rules
    pub fn validate(&self) -> StoreResult<()> {
        for donor in &self.donors {
            donor
                .validate()
                .map_err(|e| invalid_record("donor", donor.id.to_string(), e))?;
        }
        for request in &self.requests {
            request
                .validate()
                .map_err(|e| invalid_record("request", request.id.to_string(), e))?;
        }
        Ok(())
    }

    /// Build in-memory stores holding the seed records
    #[must_use]
    pub fn into_stores(self, parallel_threshold: usize) -> (InMemoryDonorStore, InMemoryRequestStore) {
        (
            InMemoryDonorStore::from_donors(self.donors).with_parallel_threshold(parallel_threshold),
            InMemoryRequestStore::from_requests(self.requests),
        )
    }
}

fn invalid_record(entity: &'static str, id: String, error: LifeLinkError) -> StoreError {
    let reason = match error {
        LifeLinkError::ValidationError(reason) => reason,
        other => other.to_string(),
    };
    StoreError::InvalidRecord { entity, id, reason }
}

/// Read and parse a seed file asynchronously
pub async fn load_seed(path: &Path) -> StoreResult<SeedData> {
    log::info!("Loading seed data from {}", path.display());

    let content = tokio::fs::read_to_string(path).await?;
    let seed = SeedData::from_json(&content)?;

    log::info!(
        "Loaded {} donors and {} requests from {}",
        seed.donors.len(),
        seed.requests.len(),
        path.display()
    );
    Ok(seed)
}
