/// Voice-platform skill endpoint
use crate::{
    envelope::{RequestEnvelope, ResponseEnvelope},
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

/// POST /api/skill - Run one turn for the requesting user
///
/// Every well-formed request gets a 200 with a response envelope, including
/// turns that failed internally; those carry the apology or link prompt.
pub async fn handle_request(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RequestEnvelope>, JsonRejection>,
) -> Result<Json<ResponseEnvelope>> {
    let Json(envelope) = payload.map_err(|e| ServerError::BadRequest(e.body_text()))?;
    let input = envelope.into_turn_input()?;

    let response = state.skill.handle(&input).await;
    Ok(Json(ResponseEnvelope::from(&response)))
}
