//! Remote fetch proxy configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings for the outbound `fetch-remote` client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteFetchConfig {
    /// Total request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for RemoteFetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl RemoteFetchConfig {
    /// The timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn default_timeout_ms() -> u64 {
    5000
}
