use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::FrontendError;

/// Body sent to the synthesis gateway. `voice_id` is left out when the
/// user did not pick one, so the gateway's own default applies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SynthesisRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AudioBody {
    audio: Option<String>,
}

/// Shared handle to the gateway. Built once at startup and cloned into
/// request handlers; the inner `reqwest::Client` pools connections.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl GatewayClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: url.into(),
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends one synthesis request and returns the base64 audio payload.
    pub async fn synthesize(&self, request: &SynthesisRequest) -> Result<String, FrontendError> {
        let response = self
            .http
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(e))?;

        tracing::debug!(status = status.as_u16(), body_len = body.len(), "Gateway responded");
        tracing::trace!("Gateway response: {}", body);

        if status != reqwest::StatusCode::OK {
            return Err(FrontendError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: AudioBody = serde_json::from_str(&body)
            .map_err(|e| FrontendError::MalformedResponse(e.to_string()))?;

        parsed
            .audio
            .ok_or_else(|| FrontendError::MalformedResponse("missing 'audio' field".to_string()))
    }

    fn classify(&self, e: reqwest::Error) -> FrontendError {
        if e.is_timeout() {
            FrontendError::Timeout(self.timeout)
        } else {
            FrontendError::Transport(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_voice_is_omitted() {
        let request = SynthesisRequest {
            text: "Hello".into(),
            voice_id: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({ "text": "Hello" })
        );
    }

    #[test]
    fn test_voice_is_sent_as_voice_id() {
        let request = SynthesisRequest {
            text: "Hello world".into(),
            voice_id: Some("Joanna".into()),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({ "text": "Hello world", "voice_id": "Joanna" })
        );
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client =
            GatewayClient::new(format!("http://{}/tts", addr), Duration::from_secs(5)).unwrap();
        let err = client
            .synthesize(&SynthesisRequest {
                text: "Hello".into(),
                voice_id: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, FrontendError::Transport(_)));
    }
}
