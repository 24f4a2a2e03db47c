//! Music Vault - Playback Session Control
//!
//! Platform-agnostic playback controller for the Music Vault voice player.
//!
//! This crate provides:
//! - Ordered request routing (first matching predicate wins)
//! - The playback state machine (play, next/previous, resume, pause)
//! - Loop and shuffle semantics (Fisher-Yates play orders)
//! - Exactly-once look-ahead enqueue
//! - Session initialization and explicit catalog refresh
//! - A turn pipeline that maps every failure to one spoken response
//!
//! # Architecture
//!
//! `vault-playback` knows nothing about HTTP or databases:
//! - Sessions are loaded and saved through [`vault_core::SessionStore`]
//! - Catalogs are fetched through [`vault_core::CatalogFetcher`]
//! - Randomness comes from a [`ShuffleStrategy`]
//!
//! A turn loads the session document, routes the request, applies a pure
//! transition to the owned document and saves it once. Overlapping turns for
//! the same user are last-writer-wins at the store.
//!
//! # Example: Single Transition
//!
//! ```rust
//! use vault_core::{SessionDocument, Track};
//! use vault_playback::{apply, route, Intent, Request, Route, SeededShuffle, TurnContext};
//!
//! let session = SessionDocument::fresh(
//!     vec![
//!         Track::new("Genesis", "https://cdn.example.com/genesis.mp3"),
//!         Track::new("Exodus", "https://cdn.example.com/exodus.mp3"),
//!     ],
//!     false,
//! );
//!
//! let request = Request::Intent(Intent::PlayAudio);
//! let route = route(&request, &session).unwrap();
//! assert_eq!(route, Route::StartPlayback);
//!
//! let shuffle = SeededShuffle::new(7);
//! let transition = apply(route, TurnContext::new(&request, Some("token"), &shuffle), session)
//!     .unwrap();
//!
//! let play = transition.response.play_directives().next().unwrap();
//! assert_eq!(play.url, "https://cdn.example.com/genesis.mp3");
//! assert_eq!(play.token, "0");
//! ```
//!
//! # Example: Full Turn
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vault_core::{CatalogFetcher, SessionStore};
//! use vault_playback::{Request, Skill, TurnInput};
//!
//! async fn turn(store: Arc<dyn SessionStore>, catalog: Arc<dyn CatalogFetcher>) {
//!     let skill = Skill::new(store, catalog);
//!     let input = TurnInput::new("amzn1.ask.account.example", Some("token".into()), Request::Launch);
//!     let response = skill.handle(&input).await;
//!     println!("{:?}", response.speech);
//! }
//! ```

mod error;
pub mod machine;
pub mod prefetch;
pub mod request;
pub mod response;
pub mod router;
pub mod session;
mod shuffle;
mod skill;
pub mod speech;

// Public exports
pub use error::{PlaybackError, Result};
pub use machine::{apply, Transition, TurnContext};
pub use request::{AudioPlayerEvent, ControllerCommand, Intent, Request, TurnInput};
pub use response::{AudioItemMetadata, Card, Directive, PlayBehavior, PlayDirective, Response};
pub use router::{route, Route};
pub use shuffle::{shuffle_order, SeededShuffle, ShuffleStrategy, ThreadRngShuffle};
pub use skill::{response_for_error, Skill};
