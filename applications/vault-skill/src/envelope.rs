/// Voice-platform request and response envelopes
///
/// Only the fields the playback controller reads are modelled; everything
/// else in the platform JSON is ignored on the way in.
use crate::error::{Result, ServerError};
use quick_xml::escape::escape;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use vault_playback::{
    AudioPlayerEvent, Card, ControllerCommand, Directive, Intent, PlayDirective, Request,
    Response, TurnInput,
};

// ===== Inbound =====

#[derive(Debug, Clone, Deserialize)]
pub struct RequestEnvelope {
    #[serde(default)]
    pub version: Option<String>,
    pub context: Context,
    pub request: RequestBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Context {
    #[serde(rename = "System")]
    pub system: SystemContext,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SystemContext {
    pub user: User,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    #[serde(default)]
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    #[serde(rename = "type")]
    pub request_type: String,
    #[serde(default)]
    pub intent: Option<IntentBody>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub offset_in_milliseconds: Option<u64>,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IntentBody {
    pub name: String,
}

impl RequestEnvelope {
    /// Decode the envelope into a turn for the playback controller
    pub fn into_turn_input(self) -> Result<TurnInput> {
        let user = self.context.system.user;
        if user.user_id.is_empty() {
            return Err(ServerError::BadRequest("userId is empty".to_string()));
        }
        let request = self.request.into_request()?;
        Ok(TurnInput::new(user.user_id, user.access_token, request))
    }
}

impl RequestBody {
    fn into_request(self) -> Result<Request> {
        let request_type = self.request_type.as_str();

        if let Some(command) = request_type.strip_prefix("PlaybackController.") {
            return Ok(Request::Controller(ControllerCommand::from_name(command)));
        }

        if let Some(event) = request_type.strip_prefix("AudioPlayer.") {
            return Ok(Request::AudioPlayer(AudioPlayerEvent::from_name(
                event,
                self.token.unwrap_or_default(),
                self.offset_in_milliseconds.unwrap_or(0),
                self.error.as_ref().map(error_text),
            )));
        }

        match request_type {
            "LaunchRequest" => Ok(Request::Launch),
            "IntentRequest" => {
                let intent = self.intent.ok_or_else(|| {
                    ServerError::BadRequest("IntentRequest without intent".to_string())
                })?;
                Ok(Request::Intent(Intent::from_name(&intent.name)))
            }
            "SessionEndedRequest" => Ok(Request::SessionEnded {
                reason: self.reason,
            }),
            "System.ExceptionEncountered" => Ok(Request::SystemException {
                error: self.error.as_ref().map(error_text).unwrap_or_default(),
            }),
            other => Err(ServerError::BadRequest(format!(
                "Unsupported request type: {}",
                other
            ))),
        }
    }
}

/// Prefer the platform's `message` field; fall back to the raw JSON
fn error_text(error: &Value) -> String {
    match error.get("message").and_then(Value::as_str) {
        Some(message) => message.to_string(),
        None => error.to_string(),
    }
}

// ===== Outbound =====

#[derive(Debug, Clone, Serialize)]
pub struct ResponseEnvelope {
    pub version: &'static str,
    pub response: ResponseBody,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<CardBody>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub directives: Vec<DirectiveBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub speech_type: &'static str,
    pub ssml: String,
}

impl OutputSpeech {
    fn ssml(text: &str) -> Self {
        Self {
            speech_type: "SSML",
            ssml: format!("<speak>{}</speak>", escape(text)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardBody {
    #[serde(rename = "type")]
    pub card_type: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum DirectiveBody {
    #[serde(rename = "AudioPlayer.Play", rename_all = "camelCase")]
    Play {
        play_behavior: &'static str,
        audio_item: AudioItem,
    },
    #[serde(rename = "AudioPlayer.Stop")]
    Stop,
}

#[derive(Debug, Clone, Serialize)]
pub struct AudioItem {
    pub stream: Stream,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    pub url: String,
    pub token: String,
    pub offset_in_milliseconds: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_previous_token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Metadata {
    pub title: String,
}

impl From<&Response> for ResponseEnvelope {
    fn from(response: &Response) -> Self {
        Self {
            version: "1.0",
            response: ResponseBody {
                output_speech: response.speech.as_deref().map(OutputSpeech::ssml),
                reprompt: response.reprompt.as_deref().map(|text| Reprompt {
                    output_speech: OutputSpeech::ssml(text),
                }),
                card: response.card.map(|card| match card {
                    Card::LinkAccount => CardBody {
                        card_type: "LinkAccount",
                    },
                }),
                directives: response.directives.iter().map(DirectiveBody::from).collect(),
                should_end_session: response.should_end_session,
            },
        }
    }
}

impl From<&Directive> for DirectiveBody {
    fn from(directive: &Directive) -> Self {
        match directive {
            Directive::Play(play) => play_directive(play),
            Directive::Stop => DirectiveBody::Stop,
        }
    }
}

fn play_directive(play: &PlayDirective) -> DirectiveBody {
    DirectiveBody::Play {
        play_behavior: play.behavior.as_str(),
        audio_item: AudioItem {
            stream: Stream {
                url: play.url.clone(),
                token: play.token.clone(),
                offset_in_milliseconds: play.offset_ms,
                expected_previous_token: play.expected_previous_token.clone(),
            },
            metadata: play.metadata.as_ref().map(|m| Metadata {
                title: m.title.clone(),
            }),
        },
    }
}
