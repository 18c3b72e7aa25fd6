pub mod handlers;
pub mod page;

use axum::{routing::get, Router};
use serde::Deserialize;
use std::sync::Arc;

use crate::client::GatewayClient;

#[derive(Debug, Deserialize)]
pub struct SubmitForm {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub voice: Option<String>,
}

pub struct FrontendState {
    pub client: GatewayClient,
    pub audio_mime: String,
}

pub fn create_router(state: Arc<FrontendState>) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::submit))
        .with_state(state)
}
