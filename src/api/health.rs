use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::Envelope;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct HealthData {
    pub status: &'static str,
    pub generation_model: String,
    pub embedding_model: String,
    pub embedding_dimensions: usize,
    pub service: &'static str,
}

/// GET /health - Service and model status
pub async fn health(State(state): State<AppState>) -> Json<Envelope<HealthData>> {
    let llm = state.llm_config.read().clone();
    Json(Envelope::new(HealthData {
        status: "healthy",
        generation_model: llm.generation_model,
        embedding_model: llm.embedding_model,
        embedding_dimensions: llm.embedding_dim,
        service: "rag-gateway (embeddings + generation)",
    }))
}
