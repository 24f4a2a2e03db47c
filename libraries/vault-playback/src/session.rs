//! Session initialization and refresh
//!
//! A stored document that is missing or not playable is rebuilt from a fresh
//! catalog fetch before the turn's transition runs. An explicit refresh does the same on demand,
//! but fails instead of degrading when no credential is available.

use crate::error::{PlaybackError, Result};
use tracing::{debug, info, warn};
use vault_core::{CatalogFetcher, SessionDocument, SessionStore, UserId};

/// Load the user's document if it can be played from
///
/// A missing document and one that is not playable both come back as
/// `None`; the caller decides whether to initialize or refresh.
pub async fn load_playable(
    store: &dyn SessionStore,
    user_id: &UserId,
) -> Result<Option<SessionDocument>> {
    match store.load(user_id).await? {
        Some(document) if document.is_playable() => {
            debug!(user_id = %user_id, tracks = document.track_count(), "Loaded session");
            Ok(Some(document))
        }
        Some(_) => {
            debug!(user_id = %user_id, "Stored session is not playable");
            Ok(None)
        }
        None => {
            info!(user_id = %user_id, "First turn for user");
            Ok(None)
        }
    }
}

/// Build a fresh document from the catalog
///
/// Without a credential the document is empty and flagged `needs_music`
/// rather than failing the turn.
pub async fn initialize(
    catalog: &dyn CatalogFetcher,
    credential: Option<&str>,
) -> Result<SessionDocument> {
    let Some(credential) = credential else {
        debug!("No credential, initializing empty session");
        return Ok(SessionDocument::fresh(Vec::new(), true));
    };

    let tracks = catalog.fetch(credential).await?;
    let needs_music = tracks.is_empty();
    if needs_music {
        warn!("Catalog fetch returned no tracks");
    }
    info!(tracks = tracks.len(), "Initialized session from catalog");
    Ok(SessionDocument::fresh(tracks, needs_music))
}

/// Re-fetch the catalog and rebuild the document from scratch
///
/// Settings are reset along with the play order. On failure the caller's
/// current document is left as it was.
pub async fn refresh(
    catalog: &dyn CatalogFetcher,
    credential: Option<&str>,
) -> Result<SessionDocument> {
    let credential = credential.ok_or(PlaybackError::AuthRequired)?;
    let tracks = catalog.fetch(credential).await.map_err(|err| {
        warn!(error = %err, "Catalog refresh failed");
        PlaybackError::from(err)
    })?;

    if tracks.is_empty() {
        return Err(PlaybackError::EmptyCatalog);
    }
    info!(tracks = tracks.len(), "Refreshed catalog");
    Ok(SessionDocument::fresh(tracks, false))
}
