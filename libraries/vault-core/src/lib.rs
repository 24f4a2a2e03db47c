//! Music Vault Core
//!
//! Domain types, collaborator traits, and error handling shared by every
//! Music Vault crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `PlaybackSetting`, `PlaybackInfo`, `SessionDocument`
//! - **Collaborator Traits**: `SessionStore`, `CatalogFetcher`
//! - **Error Handling**: `VaultError`, `CatalogError` and the `Result` alias
//!
//! # Example
//!
//! ```rust
//! use vault_core::types::{SessionDocument, Track};
//!
//! let catalog = vec![
//!     Track::new("Genesis", "https://cdn.example.com/genesis.mp3"),
//!     Track::new("Exodus", "https://cdn.example.com/exodus.mp3").with_collection("Drops"),
//! ];
//!
//! let document = SessionDocument::fresh(catalog, false);
//! assert_eq!(document.playback_info.play_order, vec![0, 1]);
//! assert_eq!(document.current_track().unwrap().title, "Genesis");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{CatalogError, Result, VaultError};
pub use traits::{CatalogFetcher, SessionStore};
pub use types::{
    PlaybackInfo, PlaybackSetting, SessionDocument, SessionPhase, Track, UserId,
};
