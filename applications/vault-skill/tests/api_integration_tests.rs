/// API integration tests
/// Tests complete HTTP request/response cycles against a mocked catalog
mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{
    body_json, catalog_server, create_test_app, envelope, intent, skill_request, ACCESS_TOKEN,
    USER_ID,
};
use serde_json::json;
use tower::util::ServiceExt;
use vault_core::{SessionStore, UserId};

/// Test GET /api/health
#[tokio::test]
async fn test_health() {
    let catalog = catalog_server().await;
    let (app, _) = create_test_app(&catalog);

    let request = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["service"], "vault-skill");
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
    assert_eq!(body["skill_endpoint"], "/api/skill");
}

/// Launch with a linked account welcomes the user and persists the catalog
#[tokio::test]
async fn test_launch_welcomes_linked_user() {
    let catalog = catalog_server().await;
    let (app, store) = create_test_app(&catalog);

    let body = envelope(Some(ACCESS_TOKEN), json!({ "type": "LaunchRequest" }));
    let response = app.oneshot(skill_request(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["version"], "1.0");
    assert_eq!(
        json["response"]["outputSpeech"]["ssml"],
        "<speak>Welcome to Music Vault. You can ask to play my music to play your 3 songs.</speak>"
    );
    assert_eq!(json["response"]["reprompt"]["outputSpeech"]["type"], "SSML");

    let stored = store.load(&UserId::from(USER_ID)).await.unwrap().unwrap();
    assert_eq!(stored.track_count(), 3);
    assert_eq!(stored.playback_info.play_order, vec![0, 1, 2]);
}

/// PlayAudio emits a REPLACE_ALL directive for the first track
#[tokio::test]
async fn test_play_emits_replace_all_directive() {
    let catalog = catalog_server().await;
    let (app, _) = create_test_app(&catalog);

    let response = app
        .oneshot(skill_request(&intent("PlayAudio")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["response"]["shouldEndSession"], true);
    assert_eq!(
        json["response"]["outputSpeech"]["ssml"],
        "<speak>Starting from the beginning. This is Genesis from Torah collection.</speak>"
    );

    let directive = &json["response"]["directives"][0];
    assert_eq!(directive["type"], "AudioPlayer.Play");
    assert_eq!(directive["playBehavior"], "REPLACE_ALL");
    assert_eq!(
        directive["audioItem"]["stream"]["url"],
        "https://cdn.test/genesis.mp3"
    );
    assert_eq!(directive["audioItem"]["stream"]["token"], "0");
    assert_eq!(directive["audioItem"]["stream"]["offsetInMilliseconds"], 0);
}

/// Started then NearlyFinished enqueues the next track exactly once
#[tokio::test]
async fn test_nearly_finished_enqueues_once() {
    let catalog = catalog_server().await;
    let (app, _) = create_test_app(&catalog);

    for body in [
        intent("PlayAudio"),
        envelope(
            Some(ACCESS_TOKEN),
            json!({ "type": "AudioPlayer.PlaybackStarted", "token": "0", "offsetInMilliseconds": 0 }),
        ),
    ] {
        let response = app.clone().oneshot(skill_request(&body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let nearly_finished = envelope(
        Some(ACCESS_TOKEN),
        json!({ "type": "AudioPlayer.PlaybackNearlyFinished", "token": "0" }),
    );

    let response = app
        .clone()
        .oneshot(skill_request(&nearly_finished))
        .await
        .unwrap();
    let json = body_json(response).await;
    let directive = &json["response"]["directives"][0];
    assert_eq!(directive["playBehavior"], "ENQUEUE");
    assert_eq!(directive["audioItem"]["stream"]["token"], "1");
    assert_eq!(directive["audioItem"]["stream"]["expectedPreviousToken"], "0");

    let response = app.oneshot(skill_request(&nearly_finished)).await.unwrap();
    let json = body_json(response).await;
    assert!(json["response"].get("directives").is_none());
}

/// Without an access token the user is asked to link their account
#[tokio::test]
async fn test_unlinked_user_gets_link_account_card() {
    let catalog = catalog_server().await;
    let (app, store) = create_test_app(&catalog);

    let body = envelope(
        None,
        json!({ "type": "IntentRequest", "intent": { "name": "PlayAudio" } }),
    );
    let response = app.oneshot(skill_request(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["response"]["card"]["type"], "LinkAccount");
    assert!(json["response"].get("directives").is_none());

    let stored = store.load(&UserId::from(USER_ID)).await.unwrap().unwrap();
    assert!(stored.playback_info.needs_music);
    assert!(stored.audio_data.is_empty());
}

/// Pause stops the device without speaking
#[tokio::test]
async fn test_pause_emits_stop() {
    let catalog = catalog_server().await;
    let (app, _) = create_test_app(&catalog);

    for body in [
        intent("PlayAudio"),
        envelope(
            Some(ACCESS_TOKEN),
            json!({ "type": "AudioPlayer.PlaybackStarted", "token": "0", "offsetInMilliseconds": 0 }),
        ),
    ] {
        app.clone().oneshot(skill_request(&body)).await.unwrap();
    }

    let response = app
        .oneshot(skill_request(&intent("AMAZON.PauseIntent")))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(
        json["response"]["directives"],
        json!([{ "type": "AudioPlayer.Stop" }])
    );
    assert!(json["response"].get("outputSpeech").is_none());
}

/// An unknown lifecycle event is answered with the apology
#[tokio::test]
async fn test_unknown_audio_player_event_apologizes() {
    let catalog = catalog_server().await;
    let (app, _) = create_test_app(&catalog);

    let body = envelope(
        Some(ACCESS_TOKEN),
        json!({ "type": "AudioPlayer.PlaybackExploded", "token": "0" }),
    );
    let response = app.oneshot(skill_request(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json["response"]["outputSpeech"]["ssml"],
        "<speak>Sorry, I had trouble doing what you asked. Please try again.</speak>"
    );
}

/// Malformed JSON is rejected before reaching the controller
#[tokio::test]
async fn test_malformed_envelope_is_bad_request() {
    let catalog = catalog_server().await;
    let (app, _) = create_test_app(&catalog);

    let request = Request::builder()
        .uri("/api/skill")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"request\": "))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].is_string());

    let unsupported = envelope(Some(ACCESS_TOKEN), json!({ "type": "Display.ElementSelected" }));
    let response = app.oneshot(skill_request(&unsupported)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
