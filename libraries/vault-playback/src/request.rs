//! Inbound requests
//!
//! One request is delivered per turn. Names are matched case-sensitively,
//! exactly as the voice platform delivers them.

use vault_core::UserId;

/// A single inbound event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// The user opened the skill without an intent
    Launch,

    /// A recognized voice intent
    Intent(Intent),

    /// A transport button on the device (`PlaybackController.*`)
    Controller(ControllerCommand),

    /// A lifecycle notification from the device player (`AudioPlayer.*`)
    AudioPlayer(AudioPlayerEvent),

    /// The platform reports that a previous response could not be executed
    SystemException {
        /// Error payload as reported by the platform
        error: String,
    },

    /// The voice session was closed
    SessionEnded {
        /// Reason given by the platform, if any
        reason: Option<String>,
    },
}

impl Request {
    /// Whether the request came from a device transport control
    pub fn is_transport_control(&self) -> bool {
        matches!(self, Self::Controller(_))
    }

    /// The intent carried by this request, if any
    pub fn intent(&self) -> Option<&Intent> {
        match self {
            Self::Intent(intent) => Some(intent),
            _ => None,
        }
    }

    /// Short description for logs
    pub fn describe(&self) -> String {
        match self {
            Self::Launch => "LaunchRequest".to_string(),
            Self::Intent(intent) => format!("IntentRequest({})", intent.name()),
            Self::Controller(command) => format!("PlaybackController.{}", command.name()),
            Self::AudioPlayer(event) => format!("AudioPlayer.{}", event.name()),
            Self::SystemException { .. } => "System.ExceptionEncountered".to_string(),
            Self::SessionEnded { .. } => "SessionEndedRequest".to_string(),
        }
    }
}

/// Voice intents the skill understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    PlayAudio,
    Resume,
    Next,
    Previous,
    Pause,
    Stop,
    Cancel,
    LoopOn,
    LoopOff,
    ShuffleOn,
    ShuffleOff,
    StartOver,
    Yes,
    No,
    Help,
    Fallback,
    ReloadSongs,
    /// Any intent outside the set above
    Other(String),
}

impl Intent {
    /// Parse an intent name as delivered by the platform
    pub fn from_name(name: &str) -> Self {
        match name {
            "PlayAudio" => Self::PlayAudio,
            "AMAZON.ResumeIntent" => Self::Resume,
            "AMAZON.NextIntent" => Self::Next,
            "AMAZON.PreviousIntent" => Self::Previous,
            "AMAZON.PauseIntent" => Self::Pause,
            "AMAZON.StopIntent" => Self::Stop,
            "AMAZON.CancelIntent" => Self::Cancel,
            "AMAZON.LoopOnIntent" => Self::LoopOn,
            "AMAZON.LoopOffIntent" => Self::LoopOff,
            "AMAZON.ShuffleOnIntent" => Self::ShuffleOn,
            "AMAZON.ShuffleOffIntent" => Self::ShuffleOff,
            "AMAZON.StartOverIntent" => Self::StartOver,
            "AMAZON.YesIntent" => Self::Yes,
            "AMAZON.NoIntent" => Self::No,
            "AMAZON.HelpIntent" => Self::Help,
            "AMAZON.FallbackIntent" => Self::Fallback,
            "ReloadSongs" => Self::ReloadSongs,
            other => Self::Other(other.to_string()),
        }
    }

    /// Platform name of the intent
    pub fn name(&self) -> &str {
        match self {
            Self::PlayAudio => "PlayAudio",
            Self::Resume => "AMAZON.ResumeIntent",
            Self::Next => "AMAZON.NextIntent",
            Self::Previous => "AMAZON.PreviousIntent",
            Self::Pause => "AMAZON.PauseIntent",
            Self::Stop => "AMAZON.StopIntent",
            Self::Cancel => "AMAZON.CancelIntent",
            Self::LoopOn => "AMAZON.LoopOnIntent",
            Self::LoopOff => "AMAZON.LoopOffIntent",
            Self::ShuffleOn => "AMAZON.ShuffleOnIntent",
            Self::ShuffleOff => "AMAZON.ShuffleOffIntent",
            Self::StartOver => "AMAZON.StartOverIntent",
            Self::Yes => "AMAZON.YesIntent",
            Self::No => "AMAZON.NoIntent",
            Self::Help => "AMAZON.HelpIntent",
            Self::Fallback => "AMAZON.FallbackIntent",
            Self::ReloadSongs => "ReloadSongs",
            Self::Other(name) => name,
        }
    }
}

/// Device transport-control signals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerCommand {
    Play,
    Next,
    Previous,
    /// Any other `PlaybackController` signal (e.g. `PauseCommandIssued`)
    Other(String),
}

impl ControllerCommand {
    /// Parse the part after `PlaybackController.`
    pub fn from_name(name: &str) -> Self {
        match name {
            "PlayCommandIssued" => Self::Play,
            "NextCommandIssued" => Self::Next,
            "PreviousCommandIssued" => Self::Previous,
            other => Self::Other(other.to_string()),
        }
    }

    /// Platform name of the signal
    pub fn name(&self) -> &str {
        match self {
            Self::Play => "PlayCommandIssued",
            Self::Next => "NextCommandIssued",
            Self::Previous => "PreviousCommandIssued",
            Self::Other(name) => name,
        }
    }
}

/// Lifecycle notifications from the device player
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioPlayerEvent {
    PlaybackStarted { token: String, offset_ms: u64 },
    PlaybackStopped { token: String, offset_ms: u64 },
    PlaybackFinished { token: String },
    PlaybackNearlyFinished { token: String },
    PlaybackFailed { token: String, error: String },
    /// A subtype outside the enumerated set; rejected by the state machine
    Unknown { name: String },
}

impl AudioPlayerEvent {
    /// Build an event from the part after `AudioPlayer.` and its payload
    pub fn from_name(name: &str, token: String, offset_ms: u64, error: Option<String>) -> Self {
        match name {
            "PlaybackStarted" => Self::PlaybackStarted { token, offset_ms },
            "PlaybackStopped" => Self::PlaybackStopped { token, offset_ms },
            "PlaybackFinished" => Self::PlaybackFinished { token },
            "PlaybackNearlyFinished" => Self::PlaybackNearlyFinished { token },
            "PlaybackFailed" => Self::PlaybackFailed {
                token,
                error: error.unwrap_or_default(),
            },
            other => Self::Unknown {
                name: other.to_string(),
            },
        }
    }

    /// Platform name of the event
    pub fn name(&self) -> &str {
        match self {
            Self::PlaybackStarted { .. } => "PlaybackStarted",
            Self::PlaybackStopped { .. } => "PlaybackStopped",
            Self::PlaybackFinished { .. } => "PlaybackFinished",
            Self::PlaybackNearlyFinished { .. } => "PlaybackNearlyFinished",
            Self::PlaybackFailed { .. } => "PlaybackFailed",
            Self::Unknown { name } => name,
        }
    }
}

/// Everything the pipeline needs to run one turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnInput {
    /// User whose session this turn belongs to
    pub user_id: UserId,

    /// Linked-account credential, `None` when the account is not linked
    pub credential: Option<String>,

    /// The one event of this turn
    pub request: Request,
}

impl TurnInput {
    /// Create a turn input; an empty credential counts as missing
    pub fn new(user_id: impl Into<UserId>, credential: Option<String>, request: Request) -> Self {
        Self {
            user_id: user_id.into(),
            credential: credential.filter(|c| !c.is_empty()),
            request,
        }
    }

    /// Credential as a borrowed string
    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }
}
