//! Turn pipeline
//!
//! load → route → initialize → transition → save, with every error converted into a
//! single user-facing response at the end. A failed turn writes nothing.

use crate::error::{PlaybackError, Result};
use crate::machine::{self, TurnContext};
use crate::request::TurnInput;
use crate::response::Response;
use crate::router::{self, Route};
use crate::session;
use crate::shuffle::{ShuffleStrategy, ThreadRngShuffle};
use crate::speech;
use std::sync::Arc;
use tracing::{debug, error, warn};
use vault_core::{CatalogFetcher, SessionDocument, SessionStore};

/// The playback controller with its collaborators
#[derive(Clone)]
pub struct Skill {
    store: Arc<dyn SessionStore>,
    catalog: Arc<dyn CatalogFetcher>,
    shuffle: Arc<dyn ShuffleStrategy>,
}

impl Skill {
    /// Create a skill drawing shuffles from the thread RNG
    pub fn new(store: Arc<dyn SessionStore>, catalog: Arc<dyn CatalogFetcher>) -> Self {
        Self {
            store,
            catalog,
            shuffle: Arc::new(ThreadRngShuffle),
        }
    }

    /// Replace the shuffle strategy
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: Arc<dyn ShuffleStrategy>) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Handle one turn, always producing a response
    pub async fn handle(&self, input: &TurnInput) -> Response {
        match self.run_turn(input).await {
            Ok(response) => response,
            Err(err) => {
                let response = response_for_error(&err);
                let request = input.request.describe();
                match err {
                    PlaybackError::AuthRequired | PlaybackError::EmptyCatalog => {
                        debug!(user_id = %input.user_id, %request, error = %err, "Turn needs account linking");
                    }
                    _ => error!(user_id = %input.user_id, %request, error = %err, "Turn failed"),
                }
                response
            }
        }
    }

    /// Run a turn, propagating errors
    ///
    /// The session is saved only when the turn succeeds.
    pub async fn run_turn(&self, input: &TurnInput) -> Result<Response> {
        let credential = input.credential();
        let stored = session::load_playable(self.store.as_ref(), &input.user_id).await?;

        // An unplayable document routes like a fresh one: all flags clear
        let unloaded = SessionDocument::default();
        let view = stored.as_ref().unwrap_or(&unloaded);
        let route = router::route(&input.request, view)
            .ok_or_else(|| PlaybackError::Unhandled(input.request.describe()))?;
        debug!(user_id = %input.user_id, ?route, phase = ?view.playback_info.phase(), "Routed request");

        let (document, response) = if route == Route::Reload {
            let refreshed = session::refresh(self.catalog.as_ref(), credential).await?;
            (refreshed, Response::new().speak(speech::RELOADED))
        } else {
            let document = match stored {
                Some(document) => document,
                None => session::initialize(self.catalog.as_ref(), credential).await?,
            };
            let ctx = TurnContext::new(&input.request, credential, self.shuffle.as_ref());
            let transition = machine::apply(route, ctx, document)?;
            (transition.session, transition.response)
        };

        if !document.is_consistent() {
            warn!(user_id = %input.user_id, ?route, "Transition produced an inconsistent session");
            return Err(PlaybackError::InvalidState(
                "play order does not match catalog".to_string(),
            ));
        }

        self.store.save(&input.user_id, &document).await?;
        Ok(response)
    }
}

/// The single user-facing response for a failed turn
pub fn response_for_error(err: &PlaybackError) -> Response {
    match err {
        PlaybackError::AuthRequired => Response::link_account(speech::LINK_ACCOUNT),
        PlaybackError::CatalogFetch(fetch) if fetch.is_auth() => {
            Response::link_account(speech::LINK_ACCOUNT)
        }
        PlaybackError::EmptyCatalog => Response::link_account(speech::UNLOCK_MUSIC),
        PlaybackError::CatalogFetch(_)
        | PlaybackError::UnknownLifecycleEvent(_)
        | PlaybackError::Persistence(_)
        | PlaybackError::Unhandled(_)
        | PlaybackError::InvalidState(_) => Response::apology(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::Card;
    use vault_core::CatalogError;

    #[test]
    fn auth_class_errors_prompt_for_linking() {
        for err in [
            PlaybackError::AuthRequired,
            PlaybackError::CatalogFetch(CatalogError::Unauthorized("401".into())),
        ] {
            let response = response_for_error(&err);
            assert_eq!(response.speech.as_deref(), Some(speech::LINK_ACCOUNT));
            assert_eq!(response.card, Some(Card::LinkAccount));
        }

        let response = response_for_error(&PlaybackError::EmptyCatalog);
        assert_eq!(response.speech.as_deref(), Some(speech::UNLOCK_MUSIC));
        assert_eq!(response.card, Some(Card::LinkAccount));
        assert!(response.directives.is_empty());
    }

    #[test]
    fn other_errors_apologize() {
        for err in [
            PlaybackError::UnknownLifecycleEvent("PlaybackExploded".into()),
            PlaybackError::Persistence("down".into()),
            PlaybackError::Unhandled("PlaybackController.NextCommandIssued".into()),
            PlaybackError::CatalogFetch(CatalogError::Network("timeout".into())),
        ] {
            assert_eq!(response_for_error(&err), Response::apology());
        }
    }
}
