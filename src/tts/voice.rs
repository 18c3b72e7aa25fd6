use lazy_static::lazy_static;
use regex::Regex;

use crate::error::AppError;

/// Voice used when a request does not name one.
pub const DEFAULT_VOICE: &str = "Joanna";

lazy_static! {
    static ref VOICE_ID_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_+\-]{1,64}$").unwrap();
}

// Managed-service voice names mapped onto the closest espeak-ng variant.
const VOICE_ALIASES: &[(&str, &str)] = &[
    ("Joanna", "en-us+f3"),
    ("Ivy", "en-us+f4"),
    ("Emma", "en-gb+f2"),
    ("Amy", "en-gb+f3"),
    ("Matthew", "en-us+m3"),
    ("Justin", "en-us+m5"),
    ("Joey", "en-us+m2"),
    ("Brian", "en-gb+m3"),
];

/// Picks the voice for a request, falling back to [`DEFAULT_VOICE`].
pub fn choose(voice_id: Option<&str>) -> &str {
    match voice_id {
        Some(v) if !v.trim().is_empty() => v,
        _ => DEFAULT_VOICE,
    }
}

/// Resolves a voice identifier into the name espeak-ng understands.
pub fn resolve(voice_id: &str) -> Result<String, AppError> {
    if let Some((_, espeak)) = VOICE_ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(voice_id))
    {
        return Ok(espeak.to_string());
    }

    if VOICE_ID_REGEX.is_match(voice_id) {
        Ok(voice_id.to_string())
    } else {
        Err(AppError::InvalidVoice(voice_id.to_string()))
    }
}

/// Names of the voices offered in the page's voice picker.
pub fn known_voices() -> impl Iterator<Item = &'static str> {
    VOICE_ALIASES.iter().map(|(alias, _)| *alias)
}
