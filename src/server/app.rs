//! Server wiring: adapters, router, and run loop

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use thiserror::Error;

use crate::application::ProcessFileUseCase;
use crate::domain::config::AppConfig;
use crate::infrastructure::{
    BoxFileStore, FfmpegAudioExtractor, OpenAiAnalyzer, WhisperTranscriber,
};

use super::webhook::{handle_webhook, health};

/// The use case with its production adapters
pub type ServiceUseCase =
    ProcessFileUseCase<BoxFileStore, FfmpegAudioExtractor, WhisperTranscriber, OpenAiAnalyzer>;

/// Shared state handed to the handlers
pub struct AppState {
    pub use_case: ServiceUseCase,
}

impl AppState {
    pub fn new(use_case: ServiceUseCase) -> Self {
        Self { use_case }
    }
}

/// Server startup errors
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Missing API key. Set OPENAI_API_KEY or run 'box-video-skill config set api_key <key>'")]
    MissingApiKey,

    #[error("Invalid bind address: {0}")]
    InvalidAddress(String),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Wire the production adapters from config
pub fn build_state(config: &AppConfig, api_key: &str) -> AppState {
    let store = BoxFileStore::new();
    let extractor = FfmpegAudioExtractor::new();
    let transcriber = WhisperTranscriber::with_model(api_key, config.whisper_model_or_default());
    let analyzer = OpenAiAnalyzer::with_model(api_key, config.completion_model_or_default());

    AppState::new(ProcessFileUseCase::new(
        store,
        extractor,
        transcriber,
        analyzer,
        config.card_selection(),
    ))
}

/// Build the router with its two routes
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/webhook", post(handle_webhook))
        .with_state(state)
}

/// Run the webhook server until shutdown
pub async fn run_server(config: AppConfig) -> Result<(), ServerError> {
    let api_key = config.api_key.clone().ok_or(ServerError::MissingApiKey)?;

    let address: SocketAddr = format!(
        "{}:{}",
        config.bind_or_default(),
        config.port_or_default()
    )
    .parse()
    .map_err(|_| {
        ServerError::InvalidAddress(format!(
            "{}:{}",
            config.bind_or_default(),
            config.port_or_default()
        ))
    })?;

    let state = Arc::new(build_state(&config, &api_key));
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(address).await?;
    tracing::info!(%address, "listening for skills webhooks");

    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn run_server_without_api_key_fails() {
        let result = run_server(AppConfig::empty()).await;
        assert!(matches!(result, Err(ServerError::MissingApiKey)));
    }

    #[tokio::test]
    async fn run_server_with_bad_address_fails() {
        let config = AppConfig {
            api_key: Some("sk-test".to_string()),
            bind: Some("not an address".to_string()),
            ..Default::default()
        };
        let result = run_server(config).await;
        assert!(matches!(result, Err(ServerError::InvalidAddress(_))));
    }
}
