//! Error types for the playback core

use thiserror::Error;
use vault_core::{CatalogError, VaultError};

/// Turn-level playback errors
///
/// Every variant is caught at the turn boundary and answered with a single
/// user-facing response; none of them leaves a partially written session.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No credential was supplied; the account has to be linked
    #[error("Account linking required")]
    AuthRequired,

    /// The catalog fetch failed (credential rejected or service unreachable)
    #[error("Catalog fetch failed: {0}")]
    CatalogFetch(#[from] CatalogError),

    /// Authenticated, but the catalog has no tracks
    #[error("Catalog is empty")]
    EmptyCatalog,

    /// The device reported an audio player event outside the known set
    #[error("Unknown audio player event: {0}")]
    UnknownLifecycleEvent(String),

    /// The session store failed to load or save
    #[error("Persistence failure: {0}")]
    Persistence(String),

    /// No route accepts the request in the current session phase
    #[error("No handler for request: {0}")]
    Unhandled(String),

    /// The session document contradicts its own invariants
    #[error("Invalid session state: {0}")]
    InvalidState(String),
}

impl From<VaultError> for PlaybackError {
    fn from(err: VaultError) -> Self {
        Self::Persistence(err.to_string())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
