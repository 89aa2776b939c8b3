use anyhow::{Context, Result};
use scrivano_core::{init_telemetry, shutdown_telemetry};
use scrivano_interface::ContentStore;
use scrivano_models::{GeminiClient, GeminiTtsClient};
use scrivano_pipeline::Pipeline;
use scrivano_server::{AppState, ScrivanoConfig, create_router};
use scrivano_store::{FileStore, MemoryStore};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before anything reads GEMINI_API_KEY
    dotenvy::dotenv().ok();
    init_telemetry().context("telemetry initialization failed")?;

    let config = ScrivanoConfig::load().context("configuration loading failed")?;
    info!(addr = %config.server.addr(), "Starting Scrivano server");

    let content_driver =
        Arc::new(GeminiClient::with_model(&config.models.content_model)
            .context("content collaborator setup failed")?);
    let speech_driver = Arc::new(
        GeminiTtsClient::with_voice(&config.models.tts_model, &config.models.voice)
            .context("speech collaborator setup failed")?,
    );

    let store: Arc<dyn ContentStore> = match config.store.backend.as_str() {
        "file" => Arc::new(FileStore::new(&config.store.path).context("store setup failed")?),
        _ => Arc::new(MemoryStore::new()),
    };
    info!(backend = %config.store.backend, "Store ready");

    let pipeline = Pipeline::start(
        content_driver,
        speech_driver,
        store,
        config.retry.policy(),
    );

    let state = AppState::new(
        pipeline.intake().clone(),
        pipeline.retrieval().clone(),
        pipeline.suggest().clone(),
    );
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.server.addr())
        .await
        .with_context(|| format!("failed to bind {}", config.server.addr()))?;
    info!("Listening for requests");

    axum::serve(listener, router)
        .await
        .context("server terminated")?;

    pipeline.shutdown().await;
    shutdown_telemetry();
    Ok(())
}
