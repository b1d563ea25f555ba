use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Envelope, Error};
use crate::models::{RankedResult, ScoredCandidate};
use crate::state::AppState;

fn default_top_k() -> usize {
    5
}

#[derive(Debug, Deserialize)]
pub struct RerankRequest {
    #[serde(default)]
    pub query: String,
    /// Raw vector-search hits; parsed leniently so malformed shapes are
    /// reported through the error envelope rather than a serde rejection.
    #[serde(default)]
    pub results: Vec<Value>,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

#[derive(Debug, Serialize)]
pub struct RerankData {
    pub results: Vec<RankedResult>,
    pub total_scored: usize,
}

/// POST /rerank - Re-rank vector-search hits with the hybrid scorer.
/// Fail-whole: every candidate must be well-formed or the call fails.
pub async fn rerank(
    State(_state): State<AppState>,
    Json(req): Json<RerankRequest>,
) -> Result<Json<Envelope<RerankData>>, Error> {
    if req.query.trim().is_empty() || req.results.is_empty() {
        return Err(Error::InvalidInput("Query and results required".into()));
    }

    let candidates = req
        .results
        .iter()
        .map(ScoredCandidate::from_value)
        .collect::<Result<Vec<_>, _>>()?;

    let total_scored = candidates.len();
    let results = crate::rerank::rerank(&req.query, candidates, req.top_k)?;

    tracing::info!(
        "Re-ranked {} candidates, returning top {}",
        total_scored,
        results.len()
    );

    Ok(Json(Envelope::new(RerankData {
        results,
        total_scored,
    })))
}
