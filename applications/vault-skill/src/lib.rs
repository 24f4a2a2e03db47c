//! Music Vault Skill Server Library
//!
//! HTTP endpoint for the voice platform: decodes request envelopes, runs one
//! playback turn and encodes the response envelope.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod envelope;
pub mod error;
pub mod state;

// Re-export commonly used types for convenience
pub use api::create_router;
pub use config::SkillConfig;
pub use envelope::{RequestEnvelope, ResponseEnvelope};
pub use error::{Result, ServerError};
pub use state::AppState;
