use std::process::Command;

use crate::config::WAV_MIME;
use crate::error::AppError;
use crate::tts::{voice, SpeechEngine};

/// Speech engine backed by the `espeak-ng` command line tool.
#[derive(Debug, Clone)]
pub struct EspeakEngine {
    binary: String,
}

impl EspeakEngine {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Arguments for one invocation. `--` keeps text that starts with a dash
    /// from being read as an option.
    pub fn command_args(text: &str, espeak_voice: &str) -> Vec<String> {
        vec![
            "--stdout".to_string(),
            "-v".to_string(),
            espeak_voice.to_string(),
            "--".to_string(),
            text.to_string(),
        ]
    }
}

impl SpeechEngine for EspeakEngine {
    fn name(&self) -> &str {
        "espeak-ng"
    }

    fn audio_mime(&self) -> &str {
        WAV_MIME
    }

    fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, AppError> {
        let espeak_voice = voice::resolve(voice_id)?;

        let output = Command::new(&self.binary)
            .args(Self::command_args(text, &espeak_voice))
            .output()
            .map_err(|e| {
                AppError::TtsError(format!(
                    "Failed to run {} (is it installed?): {}",
                    self.binary, e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::TtsError(format!(
                "{} failed: {}",
                self.binary,
                stderr.trim()
            )));
        }

        if !output.stdout.starts_with(b"RIFF") {
            return Err(AppError::TtsError(format!(
                "{} produced no WAV data",
                self.binary
            )));
        }

        Ok(output.stdout)
    }
}
