use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{Envelope, Error};
use crate::query::classify::{self, Complexity, QueryType};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestedParams {
    pub top_k: usize,
    pub expand_query: bool,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeData {
    pub query_type: QueryType,
    pub suggested_params: SuggestedParams,
    pub query_length: usize,
    pub complexity: Complexity,
}

/// POST /analyze-query - Classify a query and suggest retrieval parameters.
pub async fn analyze_query(
    State(_state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<Envelope<AnalyzeData>>, Error> {
    if req.query.trim().is_empty() {
        return Err(Error::InvalidInput("No query provided".into()));
    }

    let analysis = classify::classify(&req.query);

    Ok(Json(Envelope::new(AnalyzeData {
        query_type: analysis.query_type,
        suggested_params: SuggestedParams {
            top_k: analysis.suggested_top_k,
            expand_query: analysis.suggested_expand,
        },
        query_length: analysis.word_count,
        complexity: analysis.complexity,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn test_state() -> AppState {
        AppState::new(Config::default()).unwrap()
    }

    #[tokio::test]
    async fn test_rejects_empty_query() {
        let req = AnalyzeRequest {
            query: String::new(),
        };
        let err = analyze_query(State(test_state()), Json(req)).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_list_query_wire_shape() {
        let req = AnalyzeRequest {
            query: "list all courses offered".to_string(),
        };
        let resp = analyze_query(State(test_state()), Json(req)).await.unwrap();
        let json = serde_json::to_value(&resp.0).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["query_type"], "list_query");
        assert_eq!(json["data"]["suggested_params"]["top_k"], 10);
        assert_eq!(json["data"]["suggested_params"]["expand_query"], true);
        assert_eq!(json["data"]["query_length"], 4);
        assert_eq!(json["data"]["complexity"], "low");
    }
}
