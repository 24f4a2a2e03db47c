//! Wire types for the catalog API.

use serde::{Deserialize, Serialize};
use vault_core::Track;

/// Catalog client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Base URL of the service (e.g., "https://vault.example.com")
    pub base_url: String,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl CatalogConfig {
    /// Config with default timeouts.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 10,
            connect_timeout_secs: 5,
        }
    }

    /// Override both timeouts.
    #[must_use]
    pub fn with_timeouts(mut self, timeout_secs: u64, connect_timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self.connect_timeout_secs = connect_timeout_secs;
        self
    }
}

/// Body of `GET /api/library`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryResponse {
    /// Tracks in catalog order
    pub content: Vec<Track>,
}
