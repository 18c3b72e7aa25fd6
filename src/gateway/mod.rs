//! Built-in synthesis gateway.
//!
//! Accepts `{"text", "voice_id"?}` and answers `{"audio": <base64>}` on
//! success or `{"error": ...}` with 400 (no text) or 500 (anything else).

pub mod handlers;
pub mod routes;

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct GatewayRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub voice_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GatewayResponse {
    pub audio: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
