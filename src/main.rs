//! blocktutor - block-code tutoring relay service
//!
//! Accepts screenshots of visual block-based programs plus optional notes,
//! relays them to a multimodal inference provider, and returns structured
//! critiques, flashcards, or raw chat completions for the tutoring front end.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use blocktutor::config::Config;
use blocktutor::services::OpenAiClient;
use blocktutor::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting blocktutor relay v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    info!("Inference provider: {}", config.openai_base_url);

    let client = OpenAiClient::new(
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
    )?;
    let state = AppState::new(Arc::new(client));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("Listening on http://0.0.0.0:{}", config.port);
    info!("Health check: http://127.0.0.1:{}/health", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
