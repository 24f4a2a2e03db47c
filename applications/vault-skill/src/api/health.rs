/// Liveness of the skill endpoint
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub service: &'static str,
    pub status: &'static str,
    pub version: &'static str,
    /// Path the voice platform posts request envelopes to
    pub skill_endpoint: &'static str,
}

/// GET /api/health - Reports the skill as up and where it takes requests
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        service: env!("CARGO_PKG_NAME"),
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        skill_endpoint: "/api/skill",
    })
}
