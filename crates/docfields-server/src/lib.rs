//! Docfields Server
//!
//! HTTP front end for field extraction and document chunking.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;
pub mod pdf;

use config::ServerConfig;
use docfields_llm::{ChatCompletionsProvider, LlmError};
use handlers::{create_router, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Completion provider could not be built
    #[error("LLM provider error: {0}")]
    Llm(#[from] LlmError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Install the global tracing subscriber
///
/// Honours `RUST_LOG`; defaults to `info`. Safe to call more than once.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Start the HTTP server
///
/// Validates configuration, builds the completion provider from the API key
/// in the environment, and serves until the listener fails.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    config.validate()?;

    info!("Starting docfields server");
    info!("Bind address: {}", config.bind_addr());
    info!("Model: {} at {}", config.llm.model, config.llm.base_url);
    info!(
        "Chunking: {} chars, {} overlap",
        config.extractor.chunk_size, config.extractor.chunk_overlap
    );

    let api_key = config.llm.api_key()?;
    let provider = ChatCompletionsProvider::with_timeout(
        config.llm.base_url.clone(),
        config.llm.model.clone(),
        api_key,
        config.llm.request_timeout(),
    )?
    .with_json_mode(config.llm.json_mode);

    let state = AppState::new(Arc::new(provider), &config)?;
    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
