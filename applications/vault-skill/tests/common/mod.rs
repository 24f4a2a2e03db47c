/// Common test utilities and fixtures
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use vault_catalog::{CatalogConfig, HttpCatalogFetcher};
use vault_playback::{SeededShuffle, Skill};
use vault_skill::{create_router, AppState};
use vault_storage::MemorySessionStore;
use wiremock::{
    matchers::{header as header_matcher, method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const USER_ID: &str = "amzn1.ask.account.integration";
pub const ACCESS_TOKEN: &str = "linked-token";

/// Catalog server returning three tracks for the linked token
pub async fn catalog_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/library"))
        .and(header_matcher("Authorization", format!("Bearer {}", ACCESS_TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [
                { "title": "Genesis", "url": "https://cdn.test/genesis.mp3", "collection": "Torah" },
                { "title": "Exodus", "url": "https://cdn.test/exodus.mp3" },
                { "title": "Leviticus", "url": "https://cdn.test/leviticus.mp3" }
            ]
        })))
        .mount(&server)
        .await;
    server
}

/// Router backed by an in-memory store and the given catalog server
pub fn create_test_app(catalog: &MockServer) -> (Router, Arc<MemorySessionStore>) {
    let store = Arc::new(MemorySessionStore::new());
    let fetcher = HttpCatalogFetcher::new(CatalogConfig::new(catalog.uri())).unwrap();
    let skill = Skill::new(store.clone(), Arc::new(fetcher))
        .with_shuffle(Arc::new(SeededShuffle::new(7)));

    (create_router(AppState::new(skill)), store)
}

/// Request envelope as the voice platform sends it
pub fn envelope(access_token: Option<&str>, request: Value) -> Value {
    let mut user = json!({ "userId": USER_ID });
    if let Some(token) = access_token {
        user["accessToken"] = json!(token);
    }
    json!({
        "version": "1.0",
        "context": { "System": { "user": user } },
        "request": request,
    })
}

pub fn intent(name: &str) -> Value {
    envelope(
        Some(ACCESS_TOKEN),
        json!({ "type": "IntentRequest", "intent": { "name": name } }),
    )
}

pub fn skill_request(body: &Value) -> Request<Body> {
    Request::builder()
        .uri("/api/skill")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: axum::response::Response) -> Value {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}
