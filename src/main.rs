use axum::routing::{get, post};
use axum::Router;
use tracing_subscriber::EnvFilter;

use rag_gateway::api;
use rag_gateway::config::Config;
use rag_gateway::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    tracing::info!(
        "LLM provider: {} ({})",
        config.llm.provider,
        config.llm.base_url
    );
    tracing::info!(
        "Embedding: {} via {} ({} dims)",
        config.llm.embedding_model,
        config.llm.embedding_provider,
        config.llm.embedding_dim
    );

    let state = AppState::new(config.clone())?;

    // No CORS layer: the service sits behind the retrieval orchestrator on
    // the same network, so cross-origin access is unnecessary.
    let app = Router::new()
        .route("/health", get(api::health::health))
        .route("/embed", post(api::embed::embed))
        .route("/embed-query", post(api::embed::embed_query))
        .route("/rerank", post(api::rerank::rerank))
        .route("/generate", post(api::generate::generate))
        .route("/analyze-query", post(api::analyze::analyze_query))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
