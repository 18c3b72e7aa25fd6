use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Failures raised by the built-in synthesis gateway. Rendered as JSON.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unsupported voice '{0}': use a known voice name or letters, digits, '_', '+' and '-' (at most 64)")]
    InvalidVoice(String),

    #[error("TTS generation failed: {0}")]
    TtsError(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InvalidVoice(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INVALID_VOICE",
                self.to_string(),
            ),
            AppError::TtsError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "TTS_ERROR",
                msg.clone(),
            ),
            AppError::JsonError(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "JSON_ERROR",
                e.to_string(),
            ),
        };

        tracing::error!("Gateway request failed: {} - {}", code, message);

        (
            status,
            Json(ErrorResponse {
                error: message,
                code: code.to_string(),
            }),
        )
            .into_response()
    }
}

/// Failures seen by the browser-facing page while talking to the gateway.
///
/// Every variant renders as a plain-text 500. An upstream 400 and an upstream
/// 500 are reported with their original code in the body only.
#[derive(thiserror::Error, Debug)]
pub enum FrontendError {
    #[error("Error: {status} - {body}")]
    Upstream { status: u16, body: String },

    #[error("Exception occurred: gateway did not respond within {}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("Exception occurred: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Exception occurred: malformed gateway response: {0}")]
    MalformedResponse(String),
}

impl IntoResponse for FrontendError {
    fn into_response(self) -> Response {
        let kind = match &self {
            FrontendError::Upstream { .. } => "upstream",
            FrontendError::Timeout(_) => "timeout",
            FrontendError::Transport(_) => "transport",
            FrontendError::MalformedResponse(_) => "malformed",
        };
        let message = self.to_string();

        tracing::error!(kind, "Synthesis failed: {}", message);

        (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("GATEWAY_URL must be set when SERVE_GATEWAY is false")]
    NoGateway,
}

impl ConfigError {
    pub fn invalid(name: &'static str, expected: &'static str, value: impl Into<String>) -> Self {
        Self::Invalid {
            name,
            expected,
            value: value.into(),
        }
    }
}

/// Anything that stops the process from coming up.
#[derive(thiserror::Error, Debug)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to build gateway client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Invalid address: {0}")]
    Address(#[from] std::net::AddrParseError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_string(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_upstream_error_is_flattened_to_500() {
        let err = FrontendError::Upstream {
            status: 400,
            body: r#"{"error": "No text provided."}"#.to_string(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_string(response).await;
        assert!(body.starts_with("Error: 400 - "));
        assert!(body.contains("No text provided."));
    }

    #[tokio::test]
    async fn test_timeout_message() {
        let response = FrontendError::Timeout(Duration::from_millis(1500)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_string(response).await;
        assert!(body.contains("within 1.5s"));
    }

    #[tokio::test]
    async fn test_bad_request_is_json_400() {
        let response = AppError::BadRequest("No text provided.".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["error"], "No text provided.");
        assert_eq!(json["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_invalid_voice_explains_itself() {
        let response = AppError::InvalidVoice("a b".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["code"], "INVALID_VOICE");
        let message = json["error"].as_str().unwrap();
        assert!(message.starts_with("Unsupported voice 'a b'"));
        assert!(message.contains("letters, digits"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::invalid("PORT", "a number", "abc");
        assert_eq!(err.to_string(), "PORT must be a number, got 'abc'");
    }
}
