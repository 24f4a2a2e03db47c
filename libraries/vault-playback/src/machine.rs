//! Playback state machine
//!
//! Each handler takes the session by value and returns the transformed
//! session together with the response. Nothing here touches storage: the
//! caller commits the returned session once, at the end of the turn.

use crate::error::{PlaybackError, Result};
use crate::prefetch;
use crate::request::{AudioPlayerEvent, Request};
use crate::response::{PlayDirective, Response};
use crate::router::Route;
use crate::shuffle::ShuffleStrategy;
use crate::speech;
use tracing::{debug, error, info, warn};
use vault_core::types::identity_order;
use vault_core::{SessionDocument, SessionPhase};

/// Per-turn inputs the handlers need besides the session
#[derive(Clone, Copy)]
pub struct TurnContext<'a> {
    pub request: &'a Request,
    pub credential: Option<&'a str>,
    pub shuffle: &'a dyn ShuffleStrategy,
}

impl<'a> TurnContext<'a> {
    pub fn new(
        request: &'a Request,
        credential: Option<&'a str>,
        shuffle: &'a dyn ShuffleStrategy,
    ) -> Self {
        Self {
            request,
            credential,
            shuffle,
        }
    }
}

/// Outcome of one handled turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub session: SessionDocument,
    pub response: Response,
}

impl Transition {
    fn new(session: SessionDocument, response: Response) -> Self {
        Self { session, response }
    }
}

/// Apply the handler for `route` to the session
///
/// [`Route::Reload`] needs the catalog fetcher and is handled by the turn
/// pipeline, not here.
pub fn apply(route: Route, ctx: TurnContext<'_>, session: SessionDocument) -> Result<Transition> {
    debug!(?route, request = %ctx.request.describe(), "Applying route");

    match route {
        Route::Launch => Ok(launch(ctx, session)),
        Route::Help => Ok(help(session)),
        Route::SystemException => Ok(system_exception(ctx, session)),
        Route::SessionEnded => Ok(session_ended(ctx, session)),
        Route::Yes => play(ctx, session),
        Route::No => no(ctx, session),
        Route::StartPlayback => play(ctx, session),
        Route::Next => next(ctx, session),
        Route::Previous => previous(ctx, session),
        Route::Pause => Ok(Transition::new(session, Response::new().add_stop_directive())),
        Route::LoopOn => Ok(set_loop(session, true)),
        Route::LoopOff => Ok(set_loop(session, false)),
        Route::ShuffleOn => Ok(shuffle_on(ctx, session)),
        Route::ShuffleOff => Ok(shuffle_off(session)),
        Route::StartOver => start_over(ctx, session),
        Route::Exit => Ok(Transition::new(session, Response::new().speak(speech::GOODBYE))),
        Route::AudioPlayerEvent => audio_player_event(ctx, session),
        Route::Fallback => Ok(Transition::new(
            session,
            Response::new()
                .speak(speech::FALLBACK)
                .reprompt(speech::FALLBACK),
        )),
        Route::Reload => Err(PlaybackError::InvalidState(
            "refresh is handled by the turn pipeline".to_string(),
        )),
        Route::IntentReflector => Ok(reflect(ctx, session)),
    }
}

/// Link or unlock prompt for a session without music, flagging it `needs_music`
///
/// The flagged session is committed like any other transition.
fn prompt_for_music(ctx: TurnContext<'_>, mut session: SessionDocument) -> Transition {
    session.playback_info.needs_music = true;
    let message = if ctx.credential.is_none() {
        speech::LINK_ACCOUNT
    } else {
        speech::UNLOCK_MUSIC
    };
    debug!(linked = ctx.credential.is_some(), "No music to play");
    Transition::new(session, Response::link_account(message))
}

fn require_play_order(session: &SessionDocument) -> Result<()> {
    if session.playback_info.play_order.is_empty() {
        return Err(PlaybackError::InvalidState("empty play order".to_string()));
    }
    Ok(())
}

/// Start the track at the current position
fn play(ctx: TurnContext<'_>, mut session: SessionDocument) -> Result<Transition> {
    if session.audio_data.is_empty() {
        return Ok(prompt_for_music(ctx, session));
    }
    require_play_order(&session)?;

    let position = session.playback_info.index;
    let track = session.track_at(position).cloned().ok_or_else(|| {
        PlaybackError::InvalidState(format!("no track at play position {position}"))
    })?;
    let token = session
        .playback_info
        .token_at(position)
        .ok_or_else(|| PlaybackError::InvalidState(format!("no token at position {position}")))?;

    let info = &mut session.playback_info;
    info.token = token.clone();
    info.next_stream_enqueued = false;

    if ctx.request.is_transport_control() {
        let directive =
            PlayDirective::replace_all(&track.url, token, info.offset_ms).with_title(&track.title);
        info!(position, token = %directive.token, offset_ms = info.offset_ms, "Playing from transport control");
        let response = Response::new()
            .with_should_end_session(true)
            .add_play_directive(directive);
        return Ok(Transition::new(session, response));
    }

    let text = if info.has_previous_playback_session {
        speech::continuing(&track)
    } else {
        info.offset_ms = 0;
        speech::from_beginning(&track)
    };

    let directive =
        PlayDirective::replace_all(&track.url, token, info.offset_ms).with_title(&track.title);
    info!(position, token = %directive.token, offset_ms = info.offset_ms, "Playing track");

    let response = Response::new()
        .speak(text)
        .with_should_end_session(true)
        .add_play_directive(directive);
    Ok(Transition::new(session, response))
}

fn launch(ctx: TurnContext<'_>, mut session: SessionDocument) -> Transition {
    if session.audio_data.is_empty() || session.playback_info.needs_music {
        return prompt_for_music(ctx, session);
    }

    let resume = if session.playback_info.has_previous_playback_session {
        session.current_track().map(speech::resume_prompt)
    } else {
        None
    };

    let response = match resume {
        Some(text) => {
            session.playback_info.in_playback_session = false;
            Response::new()
                .speak(text)
                .reprompt(speech::RESUME_REPROMPT)
        }
        None => Response::new()
            .speak(speech::welcome(session.track_count()))
            .reprompt(speech::WELCOME_REPROMPT),
    };
    Transition::new(session, response)
}

fn help(session: SessionDocument) -> Transition {
    let text = match (session.playback_info.phase(), session.current_track()) {
        (SessionPhase::Playing, _) => speech::HELP_PLAYING.to_string(),
        (SessionPhase::Offering, Some(track)) => speech::resume_prompt(track),
        _ => speech::HELP_IDLE.to_string(),
    };
    let response = Response::new().speak(text.clone()).reprompt(text);
    Transition::new(session, response)
}

fn no(ctx: TurnContext<'_>, mut session: SessionDocument) -> Result<Transition> {
    let info = &mut session.playback_info;
    info.index = 0;
    info.offset_ms = 0;
    info.has_previous_playback_session = false;
    info.playback_index_changed = true;
    play(ctx, session)
}

fn next(ctx: TurnContext<'_>, mut session: SessionDocument) -> Result<Transition> {
    if session.audio_data.is_empty() {
        return Ok(prompt_for_music(ctx, session));
    }
    require_play_order(&session)?;

    let len = session.playback_info.play_order.len();
    let next_index = (session.playback_info.index + 1) % len;
    if next_index == 0 && !session.playback_setting.loop_enabled {
        debug!("Next at end of play order with loop off");
        let response = Response::new()
            .speak(speech::END_OF_PLAYLIST)
            .add_stop_directive();
        return Ok(Transition::new(session, response));
    }

    let info = &mut session.playback_info;
    info.index = next_index;
    info.offset_ms = 0;
    info.playback_index_changed = true;
    play(ctx, session)
}

fn previous(ctx: TurnContext<'_>, mut session: SessionDocument) -> Result<Transition> {
    if session.audio_data.is_empty() {
        return Ok(prompt_for_music(ctx, session));
    }
    require_play_order(&session)?;

    let len = session.playback_info.play_order.len();
    let previous_index = match session.playback_info.index.checked_sub(1) {
        Some(index) => index,
        None if session.playback_setting.loop_enabled => len - 1,
        None => {
            debug!("Previous at start of play order with loop off");
            let response = Response::new()
                .speak(speech::START_OF_PLAYLIST)
                .add_stop_directive();
            return Ok(Transition::new(session, response));
        }
    };

    let info = &mut session.playback_info;
    info.index = previous_index;
    info.offset_ms = 0;
    info.playback_index_changed = true;
    play(ctx, session)
}

fn start_over(ctx: TurnContext<'_>, mut session: SessionDocument) -> Result<Transition> {
    session.playback_info.offset_ms = 0;
    play(ctx, session)
}

fn set_loop(mut session: SessionDocument, enabled: bool) -> Transition {
    session.playback_setting.loop_enabled = enabled;
    let text = if enabled {
        speech::LOOP_ON
    } else {
        speech::LOOP_OFF
    };
    Transition::new(session, Response::new().speak(text))
}

fn shuffle_on(ctx: TurnContext<'_>, mut session: SessionDocument) -> Transition {
    let order = ctx.shuffle.permutation(session.track_count());
    session.playback_setting.shuffle = true;

    let info = &mut session.playback_info;
    info.play_order = order;
    info.index = 0;
    info.offset_ms = 0;
    info.playback_index_changed = true;
    debug!(len = info.play_order.len(), "Generated shuffled play order");

    Transition::new(session, Response::new().speak(speech::SHUFFLE_ON))
}

fn shuffle_off(mut session: SessionDocument) -> Transition {
    if session.playback_setting.shuffle {
        session.playback_setting.shuffle = false;
        let info = &mut session.playback_info;
        if let Some(absolute) = info.current_catalog_index() {
            info.index = absolute;
        }
        info.play_order = identity_order(session.audio_data.len());
    }
    Transition::new(session, Response::new().speak(speech::SHUFFLE_OFF))
}

fn reflect(ctx: TurnContext<'_>, session: SessionDocument) -> Transition {
    let name = ctx.request.intent().map_or("an unknown intent", |intent| intent.name());
    Transition::new(session, Response::new().speak(speech::reflect(name)))
}

fn system_exception(ctx: TurnContext<'_>, session: SessionDocument) -> Transition {
    if let Request::SystemException { error } = ctx.request {
        error!(error = %error, "System exception encountered");
    }
    Transition::new(session, Response::new())
}

fn session_ended(ctx: TurnContext<'_>, session: SessionDocument) -> Transition {
    if let Request::SessionEnded { reason } = ctx.request {
        info!(reason = reason.as_deref().unwrap_or("unspecified"), "Session ended");
    }
    Transition::new(session, Response::new())
}

/// Record the device token and move `index` to its position when it resolves
fn track_token(session: &mut SessionDocument, token: &str) {
    let info = &mut session.playback_info;
    info.token = token.to_string();

    match token.parse::<usize>().ok().and_then(|i| info.position_of(i)) {
        Some(position) => info.index = position,
        None => warn!(token, "Device token does not resolve to a play position"),
    }
}

fn audio_player_event(ctx: TurnContext<'_>, mut session: SessionDocument) -> Result<Transition> {
    let Request::AudioPlayer(event) = ctx.request else {
        return Err(PlaybackError::InvalidState(format!(
            "{} is not an audio player event",
            ctx.request.describe()
        )));
    };

    let mut response = Response::new();
    match event {
        AudioPlayerEvent::PlaybackStarted { token, .. } => {
            track_token(&mut session, token);
            let info = &mut session.playback_info;
            info.in_playback_session = true;
            info.has_previous_playback_session = true;
            info.next_stream_enqueued = false;
        }
        AudioPlayerEvent::PlaybackStopped { token, offset_ms } => {
            track_token(&mut session, token);
            session.playback_info.offset_ms = *offset_ms;
        }
        AudioPlayerEvent::PlaybackFinished { .. } => {
            let info = &mut session.playback_info;
            info.in_playback_session = false;
            info.has_previous_playback_session = false;
            info.next_stream_enqueued = false;
        }
        AudioPlayerEvent::PlaybackNearlyFinished { .. } => {
            if let Some(directive) = prefetch::enqueue_next(&mut session) {
                response = response.add_play_directive(directive);
            }
        }
        AudioPlayerEvent::PlaybackFailed { token, error } => {
            session.playback_info.in_playback_session = false;
            error!(token = %token, error = %error, "Playback failed");
        }
        AudioPlayerEvent::Unknown { name } => {
            error!(event = %name, "Unknown audio player event");
            return Err(PlaybackError::UnknownLifecycleEvent(name.clone()));
        }
    }

    debug!(event = event.name(), index = session.playback_info.index, "Handled audio player event");
    Ok(Transition::new(session, response))
}
