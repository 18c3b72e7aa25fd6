pub mod espeak;
pub mod voice;

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::AppError;

pub use espeak::EspeakEngine;
pub use voice::DEFAULT_VOICE;

/// Something that turns text into a complete, playable audio byte stream.
pub trait SpeechEngine: Send + Sync {
    fn name(&self) -> &str;

    /// MIME type of the bytes returned by [`SpeechEngine::synthesize`].
    fn audio_mime(&self) -> &str;

    fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, AppError>;
}

#[derive(Clone)]
pub struct TtsService {
    engine: Arc<dyn SpeechEngine>,
}

impl TtsService {
    pub fn new(engine: Arc<dyn SpeechEngine>) -> Self {
        Self { engine }
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    pub fn audio_mime(&self) -> &str {
        self.engine.audio_mime()
    }

    /// Synthesizes `text` and returns the audio as standard base64.
    pub async fn speak_base64(&self, text: &str, voice_id: Option<&str>) -> Result<String, AppError> {
        if text.is_empty() {
            return Err(AppError::BadRequest("No text provided.".into()));
        }

        let voice = voice::choose(voice_id).to_string();
        let text = text.to_string();
        let engine = Arc::clone(&self.engine);

        tracing::debug!(engine = engine.name(), voice = %voice, chars = text.len(), "Synthesizing");

        // Engines block (subprocesses, native code), keep them off the async workers
        let audio = tokio::task::spawn_blocking(move || engine.synthesize(&text, &voice))
            .await
            .map_err(|e| AppError::TtsError(format!("Synthesis task failed: {}", e)))??;

        Ok(encode_audio(&audio))
    }
}

pub fn encode_audio(audio: &[u8]) -> String {
    STANDARD.encode(audio)
}

pub fn decode_audio(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(encoded)
}
