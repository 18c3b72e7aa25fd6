use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::client::GatewayClient;
use crate::config::{Config, MPEG_MIME};
use crate::error::StartupError;
use crate::frontend::{self, FrontendState};
use crate::gateway::{self, routes::GatewayState};
use crate::tts::{EspeakEngine, TtsService};

/// Assembles the page, the optional built-in gateway and the health probe.
pub fn create_app(
    frontend_state: Arc<FrontendState>,
    gateway_state: Option<Arc<GatewayState>>,
) -> Router {
    let mut app = frontend::create_router(frontend_state)
        .route("/health", get(gateway::handlers::health));

    if let Some(state) = gateway_state {
        app = app.nest("/api", gateway::routes::create_router(state));
    }

    // Last resort: a panicking handler still answers with a 500
    app.layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
}

/// Builds the application from configuration.
pub fn from_config(config: &Config) -> Result<Router, StartupError> {
    let client = GatewayClient::new(config.gateway_url.clone(), config.gateway_timeout)?;

    let gateway_state = config.serve_gateway.then(|| {
        let engine = Arc::new(EspeakEngine::new(config.espeak_bin.clone()));
        Arc::new(GatewayState {
            tts: TtsService::new(engine),
        })
    });

    let frontend_state = Arc::new(FrontendState {
        client,
        audio_mime: page_audio_mime(config, gateway_state.as_deref()),
    });

    Ok(create_app(frontend_state, gateway_state))
}

/// MIME type for the page's `data:` URL: an explicit `AUDIO_MIME`, else the
/// built-in engine's own type when the page calls it, else MP3.
pub fn page_audio_mime(config: &Config, gateway: Option<&GatewayState>) -> String {
    if let Some(mime) = &config.audio_mime {
        return mime.clone();
    }
    match gateway {
        Some(state) if config.targets_builtin_gateway() => state.tts.audio_mime().to_string(),
        _ => MPEG_MIME.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        Config::from_lookup(|name| map.get(name).map(|v| v.to_string())).unwrap()
    }

    fn espeak_gateway() -> GatewayState {
        GatewayState {
            tts: TtsService::new(Arc::new(EspeakEngine::new("espeak-ng"))),
        }
    }

    #[test]
    fn test_builtin_target_uses_engine_mime() {
        let gateway = espeak_gateway();

        let config = config_from(&[]);
        assert_eq!(page_audio_mime(&config, Some(&gateway)), "audio/wav");

        let config = config_from(&[("GATEWAY_URL", "http://127.0.0.1:3000/api/text_to_speech")]);
        assert_eq!(page_audio_mime(&config, Some(&gateway)), "audio/wav");
    }

    #[test]
    fn test_external_target_is_mpeg() {
        let config = config_from(&[("GATEWAY_URL", "https://tts.example.com/prod")]);
        assert_eq!(page_audio_mime(&config, Some(&espeak_gateway())), "audio/mpeg");

        let config = config_from(&[
            ("GATEWAY_URL", "https://tts.example.com/prod"),
            ("SERVE_GATEWAY", "false"),
        ]);
        assert_eq!(page_audio_mime(&config, None), "audio/mpeg");
    }

    #[test]
    fn test_explicit_mime_wins() {
        let config = config_from(&[("AUDIO_MIME", "audio/ogg")]);
        assert_eq!(page_audio_mime(&config, Some(&espeak_gateway())), "audio/ogg");
    }
}
