//! Remote source configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Remote end-of-day file server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Directory listing URL; file URLs are resolved against it.
    pub listing_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Files of one type fetched and decoded concurrently.
    #[serde(default = "default_max_concurrent_files")]
    pub max_concurrent_files: usize,
}

impl SourceConfig {
    /// Request timeout as a `Duration`.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

const fn default_request_timeout_secs() -> u64 {
    30
}

const fn default_max_concurrent_files() -> usize {
    4
}
