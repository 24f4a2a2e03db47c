/// Playback session state persisted once per user
use crate::types::Track;
use serde::{Deserialize, Serialize};

/// User playback preferences toggled by voice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackSetting {
    /// Wrap around at either end of the play order
    #[serde(rename = "loop")]
    pub loop_enabled: bool,

    /// Play order is a random permutation rather than the identity
    pub shuffle: bool,
}

/// Position and lifecycle flags of a user's playback session
///
/// Invariants:
/// - `play_order` is a permutation of `[0, N)` where `N` is the catalog size
/// - `index < play_order.len()` whenever the play order is non-empty
/// - `next_stream_enqueued` is cleared on the next `PlaybackStarted`/`PlaybackFinished`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackInfo {
    /// Logical position -> catalog index
    pub play_order: Vec<usize>,

    /// Current position within `play_order`
    pub index: usize,

    /// Resume offset into the current track
    pub offset_ms: u64,

    /// Token of the stream most recently played or stopped on the device
    pub token: String,

    /// A look-ahead ENQUEUE has been issued for the following track
    pub next_stream_enqueued: bool,

    /// The device is currently inside a playback session
    pub in_playback_session: bool,

    /// There is a session the user can resume
    pub has_previous_playback_session: bool,

    /// No credential or catalog is available
    pub needs_music: bool,

    /// Dirty flag for display/analytics consumers
    pub playback_index_changed: bool,
}

/// Phase of a session, derived from the persisted flags
///
/// The "stopped but resumable" state and a pending resume prompt share the
/// same flags, so both surface as [`SessionPhase::Offering`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Never played, or the last session ran to completion
    NoSession,

    /// A previous session can be resumed
    Offering,

    /// The device is playing (or paused inside) a session
    Playing,
}

impl PlaybackInfo {
    /// Fresh session over a catalog of `len` tracks with identity order
    pub fn fresh(len: usize, needs_music: bool) -> Self {
        Self {
            play_order: identity_order(len),
            index: 0,
            offset_ms: 0,
            token: String::new(),
            next_stream_enqueued: false,
            in_playback_session: false,
            has_previous_playback_session: false,
            needs_music,
            playback_index_changed: false,
        }
    }

    /// Catalog index of the track at the current position
    pub fn current_catalog_index(&self) -> Option<usize> {
        self.play_order.get(self.index).copied()
    }

    /// Position of a catalog index within the play order
    pub fn position_of(&self, catalog_index: usize) -> Option<usize> {
        self.play_order.iter().position(|&i| i == catalog_index)
    }

    /// Token the device player uses for the track at `position`
    pub fn token_at(&self, position: usize) -> Option<String> {
        self.play_order.get(position).map(ToString::to_string)
    }

    /// Derived session phase
    pub fn phase(&self) -> SessionPhase {
        if self.in_playback_session {
            SessionPhase::Playing
        } else if self.has_previous_playback_session {
            SessionPhase::Offering
        } else {
            SessionPhase::NoSession
        }
    }
}

impl Default for PlaybackInfo {
    fn default() -> Self {
        Self::fresh(0, false)
    }
}

/// The per-user persisted document
///
/// Replaced as one unit at the end of a turn, never written field by field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDocument {
    /// Loop/shuffle preferences
    pub playback_setting: PlaybackSetting,

    /// Catalog snapshot
    pub audio_data: Vec<Track>,

    /// Playback position and flags
    pub playback_info: PlaybackInfo,
}

impl SessionDocument {
    /// Fresh document for a newly fetched catalog
    pub fn fresh(catalog: Vec<Track>, needs_music: bool) -> Self {
        let playback_info = PlaybackInfo::fresh(catalog.len(), needs_music);
        Self {
            playback_setting: PlaybackSetting::default(),
            audio_data: catalog,
            playback_info,
        }
    }

    /// Number of tracks in the catalog snapshot
    pub fn track_count(&self) -> usize {
        self.audio_data.len()
    }

    /// Track at a logical position of the play order
    pub fn track_at(&self, position: usize) -> Option<&Track> {
        self.playback_info
            .play_order
            .get(position)
            .and_then(|&i| self.audio_data.get(i))
    }

    /// Track at the current position
    pub fn current_track(&self) -> Option<&Track> {
        self.track_at(self.playback_info.index)
    }

    /// Play order is a permutation of the catalog and the index is in range
    pub fn is_consistent(&self) -> bool {
        let order = &self.playback_info.play_order;
        if order.len() != self.audio_data.len() {
            return false;
        }
        let mut seen = vec![false; order.len()];
        for &i in order {
            match seen.get_mut(i) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        order.is_empty() || self.playback_info.index < order.len()
    }

    /// Non-empty and consistent; anything else is re-initialized at turn start
    pub fn is_playable(&self) -> bool {
        !self.playback_info.play_order.is_empty() && self.is_consistent()
    }
}

/// Identity play order `[0, 1, ..., len - 1]`
pub fn identity_order(len: usize) -> Vec<usize> {
    (0..len).collect()
}
