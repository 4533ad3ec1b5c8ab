//! Submission loop tuning.

use std::time::Duration;

use serde::Deserialize;

use crate::application::{
    SubmitterSettings, DEFAULT_FAILURE_LIMIT, DEFAULT_MAX_CONCURRENCY, DEFAULT_POLL_INTERVAL,
};
use crate::domain::{FillerPolicy, DEFAULT_FILLER, DEFAULT_MIN_LENGTH};

/// `[submit]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitConfig {
    /// Delay between detail polls in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Rejected submissions tolerated per enrollment before giving up.
    #[serde(default = "default_failure_limit")]
    pub failure_limit: u32,
    /// Enrollments submitted to at the same time.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    /// Character repeated for required fields missing from the profile.
    #[serde(default = "default_filler")]
    pub filler: char,
    /// Filler length for fields without a declared minimum length.
    #[serde(default = "default_min_length")]
    pub default_min_length: usize,
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL.as_millis() as u64
}

const fn default_failure_limit() -> u32 {
    DEFAULT_FAILURE_LIMIT
}

const fn default_max_concurrency() -> usize {
    DEFAULT_MAX_CONCURRENCY
}

const fn default_filler() -> char {
    DEFAULT_FILLER
}

const fn default_min_length() -> usize {
    DEFAULT_MIN_LENGTH
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            failure_limit: default_failure_limit(),
            max_concurrency: default_max_concurrency(),
            filler: default_filler(),
            default_min_length: default_min_length(),
        }
    }
}

impl From<&SubmitConfig> for SubmitterSettings {
    fn from(config: &SubmitConfig) -> Self {
        Self {
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            failure_limit: config.failure_limit,
            filler: FillerPolicy {
                filler: config.filler,
                default_min_length: config.default_min_length,
            },
        }
    }
}
