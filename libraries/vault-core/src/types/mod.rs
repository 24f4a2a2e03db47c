mod ids;
mod playback_state;
mod track;

pub use ids::UserId;
pub use playback_state::{
    identity_order, PlaybackInfo, PlaybackSetting, SessionDocument, SessionPhase,
};
pub use track::Track;
