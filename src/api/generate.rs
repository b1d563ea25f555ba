use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Envelope, Error};
use crate::llm;
use crate::models::ContextDoc;
use crate::prompt;
use crate::state::AppState;

/// Source excerpts are truncated to this many characters in the response.
const SOURCE_EXCERPT_CHARS: usize = 200;
/// At most this many source excerpts are returned.
const MAX_SOURCES: usize = 3;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub query: String,
    /// Context passages, already ranked best-first by the caller.
    #[serde(default)]
    pub context_docs: Vec<Value>,
    /// Override the configured generation model.
    pub model: Option<String>,
    #[serde(default)]
    pub include_sources: bool,
}

#[derive(Debug, Serialize)]
pub struct SourceExcerpt {
    pub text: String,
    pub score: f64,
    pub metadata: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct GenerateData {
    pub response: String,
    pub model_used: String,
    pub context_chunks: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<SourceExcerpt>>,
}

/// POST /generate - Grounded answer generation from supplied context only.
pub async fn generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<Envelope<GenerateData>>, Error> {
    let query = req.query.trim().to_string();
    if query.is_empty() {
        return Err(Error::InvalidInput("No query provided".into()));
    }

    let docs = req
        .context_docs
        .iter()
        .map(ContextDoc::from_value)
        .collect::<Result<Vec<_>, _>>()?;

    let llm_config = state.llm_config.read().clone();
    let model = req
        .model
        .unwrap_or_else(|| llm_config.generation_model.clone());

    let prompt = prompt::build_prompt(&state.config.generation.persona, &query, &docs);

    let answer = llm::generate::generate(
        &state.http_client,
        &llm_config,
        &state.config.generation,
        &model,
        &prompt,
    )
    .await
    .map_err(Error::UpstreamGeneration)?;

    let sources = if req.include_sources && !docs.is_empty() {
        Some(
            docs.iter()
                .take(MAX_SOURCES)
                .map(|doc| SourceExcerpt {
                    text: truncate_excerpt(&doc.text, SOURCE_EXCERPT_CHARS),
                    score: doc.effective_score(),
                    metadata: doc.metadata.clone(),
                })
                .collect(),
        )
    } else {
        None
    };

    Ok(Json(Envelope::new(GenerateData {
        response: answer,
        model_used: model,
        context_chunks: docs.len(),
        sources,
    })))
}

/// Truncate to `max_chars` characters with an ellipsis marker when longer.
fn truncate_excerpt(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(max_chars).collect();
        out.push_str("...");
        out
    }
}
