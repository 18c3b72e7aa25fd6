use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use speech_bridge::error::StartupError;
use speech_bridge::Config;

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().map_err(|e| {
        tracing::error!("{}", e);
        e
    })?;

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    tracing::info!("Speech Bridge v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Starting server on http://{}", addr);
    tracing::info!("Synthesis gateway: {}", config.gateway_url);
    if config.serve_gateway {
        tracing::info!("Serving built-in gateway with {}", config.espeak_bin);
    }

    let app = speech_bridge::from_config(&config)?;

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
