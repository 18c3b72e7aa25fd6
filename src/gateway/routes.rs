use axum::{
    http::{header, Method},
    routing::post,
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use super::handlers;
use crate::tts::TtsService;

pub struct GatewayState {
    pub tts: TtsService,
}

/// Routes served under `/api`.
pub fn create_router(state: Arc<GatewayState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/text_to_speech", post(handlers::text_to_speech))
        .layer(cors)
        .with_state(state)
}
