use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::default_true;
use crate::error::{Envelope, Error};
use crate::llm::embeddings;
use crate::query::expand;
use crate::state::AppState;
use crate::text;

#[derive(Debug, Deserialize)]
pub struct EmbedRequest {
    #[serde(default)]
    pub texts: Vec<String>,
    /// Scale vectors to unit norm for cosine similarity downstream.
    #[serde(default = "default_true")]
    pub normalize: bool,
}

#[derive(Debug, Serialize)]
pub struct EmbedData {
    pub embeddings: Vec<Vec<f32>>,
    pub count: usize,
    pub dimensions: usize,
}

/// POST /embed - Embed a batch of corpus texts.
///
/// Texts are normalized before embedding so corpus and query share one
/// embedding space. In hashed (degraded) mode this call also fits the
/// process-wide vectorizer on the submitted corpus.
pub async fn embed(
    State(state): State<AppState>,
    Json(req): Json<EmbedRequest>,
) -> Result<Json<Envelope<EmbedData>>, Error> {
    if req.texts.is_empty() {
        return Err(Error::InvalidInput("No texts provided".into()));
    }

    let processed: Vec<String> = req.texts.iter().map(|t| text::normalize(t)).collect();

    let llm = state.llm_config.read().clone();
    let vectors = if llm.embedding_provider == "hashed" {
        state.hashed.fit(&processed);
        state
            .hashed
            .encode(&processed, req.normalize)
            .map_err(Error::UpstreamEmbedding)?
    } else {
        embeddings::embed_batch(&state.http_client, &llm, &processed, req.normalize)
            .await
            .map_err(Error::UpstreamEmbedding)?
    };

    let dimensions = vectors.first().map(Vec::len).unwrap_or(0);
    Ok(Json(Envelope::new(EmbedData {
        count: vectors.len(),
        dimensions,
        embeddings: vectors,
    })))
}

#[derive(Debug, Deserialize)]
pub struct EmbedQueryRequest {
    #[serde(default)]
    pub query: String,
    /// Expand with domain synonyms before embedding.
    #[serde(default = "default_true")]
    pub expand: bool,
}

#[derive(Debug, Serialize)]
pub struct EmbedQueryData {
    pub embedding: Vec<f32>,
    pub original_query: String,
    pub expanded_query: Option<String>,
    pub dimensions: usize,
}

/// POST /embed-query - Embed a search query, optionally expanded for recall.
pub async fn embed_query(
    State(state): State<AppState>,
    Json(req): Json<EmbedQueryRequest>,
) -> Result<Json<Envelope<EmbedQueryData>>, Error> {
    let query = req.query.trim().to_string();
    if query.is_empty() {
        return Err(Error::InvalidInput("No query provided".into()));
    }

    // Expand at most once: expansion is not idempotent
    let expanded = if req.expand {
        let expanded = expand::expand(&query);
        tracing::info!("Query expansion: '{}' -> '{}'", query, expanded);
        Some(expanded)
    } else {
        None
    };

    let processed = text::normalize(expanded.as_deref().unwrap_or(&query));

    let llm = state.llm_config.read().clone();
    let embedding = if llm.embedding_provider == "hashed" {
        state
            .hashed
            .encode(&[processed], true)
            .map_err(Error::UpstreamEmbedding)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::UpstreamEmbedding(anyhow::anyhow!("No embedding returned")))?
    } else {
        embeddings::embed_single(&state.http_client, &llm, &processed)
            .await
            .map_err(Error::UpstreamEmbedding)?
    };

    Ok(Json(Envelope::new(EmbedQueryData {
        dimensions: embedding.len(),
        embedding,
        original_query: query,
        expanded_query: expanded,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn hashed_state(dim: usize) -> AppState {
        let mut config = Config::default();
        config.llm.embedding_provider = "hashed".to_string();
        config.llm.embedding_dim = dim;
        AppState::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_embed_rejects_empty_texts() {
        let state = AppState::new(Config::default()).unwrap();
        let req = EmbedRequest {
            texts: vec![],
            normalize: true,
        };
        let err = embed(State(state), Json(req)).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_embed_query_rejects_empty_query() {
        let state = AppState::new(Config::default()).unwrap();
        let req = EmbedQueryRequest {
            query: "   ".to_string(),
            expand: true,
        };
        let err = embed_query(State(state), Json(req)).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_hashed_mode_fits_corpus_then_serves_queries() {
        let state = hashed_state(64);

        let corpus = EmbedRequest {
            texts: vec![
                "Dr. Rao teaches Machine Learning".to_string(),
                "The library is open 9-5".to_string(),
            ],
            normalize: true,
        };
        let resp = embed(State(state.clone()), Json(corpus)).await.unwrap();
        assert_eq!(resp.0.data.count, 2);
        assert_eq!(resp.0.data.dimensions, 64);

        let query = EmbedQueryRequest {
            query: "who teaches machine learning".to_string(),
            expand: true,
        };
        let resp = embed_query(State(state), Json(query)).await.unwrap();
        assert_eq!(resp.0.data.dimensions, 64);
        assert_eq!(resp.0.data.original_query, "who teaches machine learning");
        assert!(resp.0.data.expanded_query.is_some());
    }

    #[tokio::test]
    async fn test_hashed_mode_query_before_fit_fails() {
        let state = hashed_state(64);
        let req = EmbedQueryRequest {
            query: "anything".to_string(),
            expand: false,
        };
        let err = embed_query(State(state), Json(req)).await.unwrap_err();
        assert!(matches!(err, Error::UpstreamEmbedding(_)));
    }
}
