/// Collaborator traits consumed by the playback core at turn boundaries
use crate::error::{CatalogError, Result};
use crate::types::{SessionDocument, Track, UserId};
use async_trait::async_trait;

/// Persistent per-user session store
///
/// One document per user, replaced whole on every save. There is no
/// optimistic concurrency control: two overlapping turns for the same user
/// race and the last writer wins.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the user's document, `None` for a first-time user
    ///
    /// # Errors
    /// Returns an error if the store is unavailable or the document is corrupt
    async fn load(&self, user_id: &UserId) -> Result<Option<SessionDocument>>;

    /// Replace the user's document
    ///
    /// # Errors
    /// Returns an error if the store is unavailable
    async fn save(&self, user_id: &UserId, document: &SessionDocument) -> Result<()>;
}

/// Remote catalog of the user's streamable tracks
#[async_trait]
pub trait CatalogFetcher: Send + Sync {
    /// Fetch the ordered track list using the caller's credential
    ///
    /// # Errors
    /// Returns [`CatalogError::Unauthorized`] when the credential is rejected
    /// and a network-class error for any other failure. Never returns a
    /// partial list.
    async fn fetch(&self, credential: &str) -> std::result::Result<Vec<Track>, CatalogError>;
}
