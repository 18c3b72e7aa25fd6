pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod frontend;
pub mod gateway;
pub mod tts;

pub use app::{create_app, from_config};
pub use config::Config;
