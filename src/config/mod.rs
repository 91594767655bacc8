//! Configuration for the matching service.

use std::fmt;
use std::time::Duration;

use crate::availability::EligibilityPolicy;

/// Environment variable bounding a donor store read, in milliseconds (0 disables)
pub const ENV_STORE_TIMEOUT_MS: &str = "LIFELINK_STORE_TIMEOUT_MS";
/// Environment variable capping concurrent matches in batch runs
pub const ENV_BATCH_CONCURRENCY: &str = "LIFELINK_BATCH_CONCURRENCY";
/// Environment variable enabling the minimum donation interval, in days
pub const ENV_MIN_DONATION_INTERVAL_DAYS: &str = "LIFELINK_MIN_DONATION_INTERVAL_DAYS";

/// Configuration for the matching service and its collaborators
#[derive(Debug, Clone)]
pub struct LifeLinkConfig {
    /// Bounded wait on a donor store read before reporting it unavailable
    pub store_timeout: Option<Duration>,
    /// Maximum number of concurrent matches when processing pending requests
    pub batch_concurrency: usize,
    /// Store size at which the in-memory store scans in parallel
    pub parallel_scan_threshold: usize,
    /// Which available donors are eligible to be matched
    pub eligibility: EligibilityPolicy,
    /// Lifetime of an e-mail verification code
    pub verification_ttl: Duration,
    /// Failed attempts allowed before a verification code is discarded
    pub verification_max_attempts: u32,
}

impl Default for LifeLinkConfig {
    fn default() -> Self {
        Self {
            store_timeout: Some(Duration::from_secs(5)),
            batch_concurrency: num_cpus::get(),
            parallel_scan_threshold: 1000,
            eligibility: EligibilityPolicy::availability_only(),
            verification_ttl: Duration::from_secs(5 * 60),
            verification_max_attempts: 5,
        }
    }
}

impl LifeLinkConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new builder for constructing a configuration
    #[must_use]
    pub fn builder() -> LifeLinkConfigBuilder {
        LifeLinkConfigBuilder::new()
    }

    /// Defaults overridden by any well-formed `LIFELINK_*` environment variables
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by values from `lookup`; malformed values are ignored
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse = |key: &str| lookup(key).and_then(|raw| raw.trim().parse::<u64>().ok());
        let mut config = Self::default();

        if let Some(ms) = parse(ENV_STORE_TIMEOUT_MS) {
            config.store_timeout = (ms > 0).then(|| Duration::from_millis(ms));
        }

        if let Some(n) = parse(ENV_BATCH_CONCURRENCY).filter(|n| *n > 0) {
            config.batch_concurrency = usize::try_from(n).unwrap_or(config.batch_concurrency);
        }

        if let Some(days) = parse(ENV_MIN_DONATION_INTERVAL_DAYS)
            .and_then(|days| i64::try_from(days).ok())
            .and_then(chrono::Duration::try_days)
        {
            config.eligibility = EligibilityPolicy::with_interval(days);
        }

        config
    }
}

impl fmt::Display for LifeLinkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "LifeLink Configuration:")?;
        match self.store_timeout {
            Some(timeout) => writeln!(f, "  Store Timeout: {timeout:?}")?,
            None => writeln!(f, "  Store Timeout: none")?,
        }
        writeln!(f, "  Batch Concurrency: {}", self.batch_concurrency)?;
        writeln!(f, "  Parallel Scan Threshold: {}", self.parallel_scan_threshold)?;
        match self.eligibility.min_donation_interval {
            Some(interval) => writeln!(
                f,
                "  Minimum Donation Interval: {} days",
                interval.num_days()
            )?,
            None => writeln!(f, "  Minimum Donation Interval: none")?,
        }
        writeln!(f, "  Verification TTL: {:?}", self.verification_ttl)?;
        writeln!(
            f,
            "  Verification Attempts: {}",
            self.verification_max_attempts
        )
    }
}

/// Builder for constructing a configuration
#[derive(Debug, Clone)]
pub struct LifeLinkConfigBuilder {
    config: LifeLinkConfig,
}

impl Default for LifeLinkConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LifeLinkConfigBuilder {
    /// Create a new builder with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: LifeLinkConfig::default(),
        }
    }

    /// Set the store read timeout
    #[must_use]
    pub const fn store_timeout(mut self, timeout: Duration) -> Self {
        self.config.store_timeout = Some(timeout);
        self
    }

    /// Wait on store reads without a bound
    #[must_use]
    pub const fn no_store_timeout(mut self) -> Self {
        self.config.store_timeout = None;
        self
    }

    /// Set the batch matching concurrency
    #[must_use]
    pub const fn batch_concurrency(mut self, concurrency: usize) -> Self {
        self.config.batch_concurrency = if concurrency == 0 { 1 } else { concurrency };
        self
    }

    /// Set the parallel scan threshold
    #[must_use]
    pub const fn parallel_scan_threshold(mut self, threshold: usize) -> Self {
        self.config.parallel_scan_threshold = threshold;
        self
    }

    /// Set the eligibility policy
    #[must_use]
    pub const fn eligibility(mut self, policy: EligibilityPolicy) -> Self {
        self.config.eligibility = policy;
        self
    }

    /// Set the verification code lifetime
    #[must_use]
    pub const fn verification_ttl(mut self, ttl: Duration) -> Self {
        self.config.verification_ttl = ttl;
        self
    }

    /// Set the number of verification attempts
    #[must_use]
    pub const fn verification_max_attempts(mut self, attempts: u32) -> Self {
        self.config.verification_max_attempts = attempts;
        self
    }

    /// Build the configuration
    #[must_use]
    pub const fn build(self) -> LifeLinkConfig {
        self.config
    }
}
