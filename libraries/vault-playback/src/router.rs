//! Ordered request routing
//!
//! Routes are tried in table order and the first matching predicate wins.
//! The order is part of the contract: several predicates overlap (e.g. a
//! Stop intent is a Pause while playing and an Exit otherwise).

use crate::request::{ControllerCommand, Intent, Request};
use vault_core::SessionDocument;

/// Handler selected for a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Launch,
    Help,
    SystemException,
    SessionEnded,
    Yes,
    No,
    StartPlayback,
    Next,
    Previous,
    Pause,
    LoopOn,
    LoopOff,
    ShuffleOn,
    ShuffleOff,
    StartOver,
    Exit,
    AudioPlayerEvent,
    Fallback,
    Reload,
    IntentReflector,
}

/// Route predicate over the request and the loaded session
pub type Predicate = fn(&Request, &SessionDocument) -> bool;

/// Dispatch table in evaluation order
pub static ROUTES: &[(Route, Predicate)] = &[
    (Route::Launch, is_launch),
    (Route::Help, is_help),
    (Route::SystemException, is_system_exception),
    (Route::SessionEnded, is_session_ended),
    (Route::Yes, is_yes),
    (Route::No, is_no),
    (Route::StartPlayback, is_start_playback),
    (Route::Next, is_next),
    (Route::Previous, is_previous),
    (Route::Pause, is_pause),
    (Route::LoopOn, is_loop_on),
    (Route::LoopOff, is_loop_off),
    (Route::ShuffleOn, is_shuffle_on),
    (Route::ShuffleOff, is_shuffle_off),
    (Route::StartOver, is_start_over),
    (Route::Exit, is_exit),
    (Route::AudioPlayerEvent, is_audio_player_event),
    (Route::Fallback, is_fallback),
    (Route::Reload, is_reload),
    (Route::IntentReflector, is_any_intent),
];

/// First route whose predicate accepts the request
pub fn route(request: &Request, session: &SessionDocument) -> Option<Route> {
    ROUTES
        .iter()
        .find(|(_, accepts)| accepts(request, session))
        .map(|(route, _)| *route)
}

fn playing(session: &SessionDocument) -> bool {
    session.playback_info.in_playback_session
}

fn intent_is(request: &Request, wanted: &Intent) -> bool {
    request.intent() == Some(wanted)
}

fn is_launch(request: &Request, _: &SessionDocument) -> bool {
    matches!(request, Request::Launch)
}

fn is_help(request: &Request, _: &SessionDocument) -> bool {
    intent_is(request, &Intent::Help)
}

fn is_system_exception(request: &Request, _: &SessionDocument) -> bool {
    matches!(request, Request::SystemException { .. })
}

fn is_session_ended(request: &Request, _: &SessionDocument) -> bool {
    matches!(request, Request::SessionEnded { .. })
}

fn is_yes(request: &Request, session: &SessionDocument) -> bool {
    !playing(session) && intent_is(request, &Intent::Yes)
}

fn is_no(request: &Request, session: &SessionDocument) -> bool {
    !playing(session) && intent_is(request, &Intent::No)
}

fn is_start_playback(request: &Request, _: &SessionDocument) -> bool {
    matches!(
        request,
        Request::Intent(Intent::PlayAudio | Intent::Resume)
            | Request::Controller(ControllerCommand::Play)
    )
}

fn is_next(request: &Request, session: &SessionDocument) -> bool {
    playing(session)
        && matches!(
            request,
            Request::Intent(Intent::Next) | Request::Controller(ControllerCommand::Next)
        )
}

fn is_previous(request: &Request, session: &SessionDocument) -> bool {
    playing(session)
        && matches!(
            request,
            Request::Intent(Intent::Previous) | Request::Controller(ControllerCommand::Previous)
        )
}

fn is_pause(request: &Request, session: &SessionDocument) -> bool {
    playing(session)
        && matches!(
            request,
            Request::Intent(Intent::Pause | Intent::Stop | Intent::Cancel)
        )
}

fn is_loop_on(request: &Request, session: &SessionDocument) -> bool {
    playing(session) && intent_is(request, &Intent::LoopOn)
}

fn is_loop_off(request: &Request, session: &SessionDocument) -> bool {
    playing(session) && intent_is(request, &Intent::LoopOff)
}

fn is_shuffle_on(request: &Request, session: &SessionDocument) -> bool {
    playing(session) && intent_is(request, &Intent::ShuffleOn)
}

fn is_shuffle_off(request: &Request, session: &SessionDocument) -> bool {
    playing(session) && intent_is(request, &Intent::ShuffleOff)
}

fn is_start_over(request: &Request, session: &SessionDocument) -> bool {
    playing(session) && intent_is(request, &Intent::StartOver)
}

fn is_exit(request: &Request, session: &SessionDocument) -> bool {
    !playing(session) && matches!(request, Request::Intent(Intent::Stop | Intent::Cancel))
}

fn is_audio_player_event(request: &Request, _: &SessionDocument) -> bool {
    matches!(request, Request::AudioPlayer(_))
}

fn is_fallback(request: &Request, _: &SessionDocument) -> bool {
    intent_is(request, &Intent::Fallback)
}

fn is_reload(request: &Request, _: &SessionDocument) -> bool {
    intent_is(request, &Intent::ReloadSongs)
}

fn is_any_intent(request: &Request, _: &SessionDocument) -> bool {
    matches!(request, Request::Intent(_))
}
