use axum::{extract::State, response::Html, Form};
use std::sync::Arc;

use super::page::{self, Audio, PageView};
use super::{FrontendState, SubmitForm};
use crate::client::SynthesisRequest;
use crate::error::FrontendError;

pub async fn index() -> Html<String> {
    Html(page::render(&PageView::default()))
}

/// Forwards the form to the gateway and renders the returned audio.
///
/// Text is passed through untouched, even when empty; the gateway decides
/// whether it is acceptable.
pub async fn submit(
    State(state): State<Arc<FrontendState>>,
    Form(form): Form<SubmitForm>,
) -> Result<Html<String>, FrontendError> {
    let request = SynthesisRequest {
        text: form.text,
        voice_id: form.voice,
    };

    tracing::info!(
        gateway = state.client.url(),
        chars = request.text.len(),
        voice = request.voice_id.as_deref().unwrap_or("<gateway default>"),
        "Forwarding synthesis request"
    );

    let audio = state.client.synthesize(&request).await?;

    Ok(Html(page::render(&PageView {
        text: &request.text,
        voice: request.voice_id.as_deref(),
        audio: Some(Audio {
            mime: &state.audio_mime,
            base64: &audio,
        }),
    })))
}
