use axum::{body::Bytes, extract::State, Json};
use std::sync::Arc;

use super::{GatewayRequest, GatewayResponse, HealthResponse};
use crate::error::AppError;
use crate::gateway::routes::GatewayState;

pub async fn text_to_speech(
    State(state): State<Arc<GatewayState>>,
    body: Bytes,
) -> Result<Json<GatewayResponse>, AppError> {
    // Parsed by hand so a missing or broken body is a 500 like any other failure
    let request: GatewayRequest = serde_json::from_slice(&body)?;

    let text = request.text.unwrap_or_default();
    let audio = state
        .tts
        .speak_base64(&text, request.voice_id.as_deref())
        .await?;

    tracing::info!(
        engine = state.tts.engine_name(),
        audio_len = audio.len(),
        "Synthesis complete"
    );

    Ok(Json(GatewayResponse { audio }))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
