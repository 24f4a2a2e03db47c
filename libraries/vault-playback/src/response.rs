//! Outbound responses
//!
//! Speech and directives are orthogonal channels: a response may carry
//! either, both, or neither.

use crate::speech;

/// How a PLAY directive interacts with the device's queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayBehavior {
    /// Stop the current stream and play this one immediately
    ReplaceAll,
    /// Append after the current stream
    Enqueue,
}

impl PlayBehavior {
    /// Wire name of the behavior
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReplaceAll => "REPLACE_ALL",
            Self::Enqueue => "ENQUEUE",
        }
    }
}

/// Metadata shown by devices with a screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioItemMetadata {
    pub title: String,
}

/// Instruction to start or enqueue a stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayDirective {
    pub behavior: PlayBehavior,
    pub url: String,
    pub token: String,
    pub offset_ms: u64,
    pub expected_previous_token: Option<String>,
    pub metadata: Option<AudioItemMetadata>,
}

impl PlayDirective {
    /// Replace whatever is playing with this stream
    pub fn replace_all(url: impl Into<String>, token: impl Into<String>, offset_ms: u64) -> Self {
        Self {
            behavior: PlayBehavior::ReplaceAll,
            url: url.into(),
            token: token.into(),
            offset_ms,
            expected_previous_token: None,
            metadata: None,
        }
    }

    /// Queue this stream after the one identified by `expected_previous_token`
    pub fn enqueue(
        url: impl Into<String>,
        token: impl Into<String>,
        expected_previous_token: impl Into<String>,
    ) -> Self {
        Self {
            behavior: PlayBehavior::Enqueue,
            url: url.into(),
            token: token.into(),
            offset_ms: 0,
            expected_previous_token: Some(expected_previous_token.into()),
            metadata: None,
        }
    }

    /// Attach display metadata
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.metadata = Some(AudioItemMetadata {
            title: title.into(),
        });
        self
    }
}

/// Outbound directive for the device player
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Play(PlayDirective),
    Stop,
}

/// Companion-app card attached to a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Card {
    /// Ask the user to link their account
    LinkAccount,
}

/// Result of a turn as seen by the device
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pub speech: Option<String>,
    pub reprompt: Option<String>,
    pub card: Option<Card>,
    pub directives: Vec<Directive>,
    pub should_end_session: Option<bool>,
}

impl Response {
    /// Empty response: no speech, no directive
    pub fn new() -> Self {
        Self::default()
    }

    /// The single apology used for every turn-level failure
    pub fn apology() -> Self {
        Self::new()
            .speak(speech::APOLOGY)
            .reprompt(speech::APOLOGY)
    }

    /// Account-link prompt with the link card
    pub fn link_account(message: &str) -> Self {
        Self::new().speak(message).with_link_account_card()
    }

    #[must_use]
    pub fn speak(mut self, text: impl Into<String>) -> Self {
        self.speech = Some(text.into());
        self
    }

    #[must_use]
    pub fn reprompt(mut self, text: impl Into<String>) -> Self {
        self.reprompt = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_link_account_card(mut self) -> Self {
        self.card = Some(Card::LinkAccount);
        self
    }

    #[must_use]
    pub fn with_should_end_session(mut self, end: bool) -> Self {
        self.should_end_session = Some(end);
        self
    }

    #[must_use]
    pub fn add_play_directive(mut self, directive: PlayDirective) -> Self {
        self.directives.push(Directive::Play(directive));
        self
    }

    #[must_use]
    pub fn add_stop_directive(mut self) -> Self {
        self.directives.push(Directive::Stop);
        self
    }

    /// PLAY directives in emission order
    pub fn play_directives(&self) -> impl Iterator<Item = &PlayDirective> {
        self.directives.iter().filter_map(|d| match d {
            Directive::Play(play) => Some(play),
            Directive::Stop => None,
        })
    }

    /// Whether a STOP directive is attached
    pub fn has_stop(&self) -> bool {
        self.directives.contains(&Directive::Stop)
    }
}
