use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Error;

/// A raw vector-search hit, input to re-ranking.
///
/// `vector_distance` is a distance (0 = identical), not a similarity. The
/// upstream vector database reports it under the wire key `score`, which is
/// accepted as an alias.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub text: String,
    pub metadata: Map<String, Value>,
    pub vector_distance: f64,
}

impl ScoredCandidate {
    /// Parse a candidate from loose JSON. A candidate missing `text` is
    /// malformed and fails the whole re-rank call.
    pub fn from_value(value: &Value) -> Result<Self, Error> {
        let obj = value
            .as_object()
            .ok_or_else(|| Error::InternalScoring("candidate is not a JSON object".into()))?;

        let text = obj
            .get("text")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::InternalScoring("candidate missing 'text' field".into()))?
            .to_string();

        let metadata = obj
            .get("metadata")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        let vector_distance = obj
            .get("vector_distance")
            .or_else(|| obj.get("score"))
            .and_then(Value::as_f64)
            .unwrap_or(0.0);

        Ok(Self {
            text,
            metadata,
            vector_distance,
        })
    }
}

/// Per-signal score components, kept unrounded so `final_score` decomposes
/// exactly as `0.5*vector + 0.25*keyword + exact_match + 0.05*length +
/// position`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub vector: f64,
    pub keyword: f64,
    pub exact_match: f64,
    pub length: f64,
    pub position: f64,
}

/// A re-ranked passage. `final_score` is not bounded to [0, 1]: bonuses are
/// additive and the ordering, not the magnitude, is the contract.
#[derive(Debug, Clone, Serialize)]
pub struct RankedResult {
    pub text: String,
    pub metadata: Map<String, Value>,
    pub vector_distance: f64,
    pub final_score: f64,
    pub score_breakdown: ScoreBreakdown,
}

/// A context passage supplied to `/generate`, already ranked best-first by
/// the caller.
#[derive(Debug, Clone)]
pub struct ContextDoc {
    pub text: String,
    pub metadata: Map<String, Value>,
    pub final_score: Option<f64>,
    pub score: Option<f64>,
}

impl ContextDoc {
    pub fn from_value(value: &Value) -> Result<Self, Error> {
        let obj = value
            .as_object()
            .ok_or_else(|| Error::InternalScoring("context document is not a JSON object".into()))?;

        let text = obj
            .get("text")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                Error::InternalScoring("context document missing 'text' field".into())
            })?
            .to_string();

        let metadata = obj
            .get("metadata")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        Ok(Self {
            text,
            metadata,
            final_score: obj.get("final_score").and_then(Value::as_f64),
            score: obj.get("score").and_then(Value::as_f64),
        })
    }

    /// Relevance shown in the prompt: re-ranked score if present, otherwise
    /// the raw retrieval score, otherwise 0.
    pub fn effective_score(&self) -> f64 {
        self.final_score.or(self.score).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ─── Candidate parsing ───────────────────────────────

    #[test]
    fn test_candidate_full_shape() {
        let v = json!({
            "text": "Dr. Rao teaches ML",
            "metadata": {"chunk_id": 0},
            "vector_distance": 0.1
        });
        let c = ScoredCandidate::from_value(&v).unwrap();
        assert_eq!(c.text, "Dr. Rao teaches ML");
        assert_eq!(c.vector_distance, 0.1);
        assert_eq!(c.metadata.get("chunk_id"), Some(&json!(0)));
    }

    #[test]
    fn test_candidate_score_alias() {
        let v = json!({"text": "t", "score": 0.4});
        let c = ScoredCandidate::from_value(&v).unwrap();
        assert_eq!(c.vector_distance, 0.4);
    }

    #[test]
    fn test_candidate_missing_text_is_malformed() {
        let v = json!({"score": 0.4});
        let err = ScoredCandidate::from_value(&v).unwrap_err();
        assert!(matches!(err, Error::InternalScoring(_)));
    }

    #[test]
    fn test_candidate_non_object_is_malformed() {
        let err = ScoredCandidate::from_value(&json!("just a string")).unwrap_err();
        assert!(matches!(err, Error::InternalScoring(_)));
    }

    #[test]
    fn test_candidate_defaults() {
        let v = json!({"text": "t"});
        let c = ScoredCandidate::from_value(&v).unwrap();
        assert_eq!(c.vector_distance, 0.0);
        assert!(c.metadata.is_empty());
    }

    // ─── Context docs ────────────────────────────────────

    #[test]
    fn test_effective_score_prefers_final_score() {
        let v = json!({"text": "t", "final_score": 0.9, "score": 0.2});
        let d = ContextDoc::from_value(&v).unwrap();
        assert_eq!(d.effective_score(), 0.9);
    }

    #[test]
    fn test_effective_score_falls_back_to_score() {
        let v = json!({"text": "t", "score": 0.2});
        let d = ContextDoc::from_value(&v).unwrap();
        assert_eq!(d.effective_score(), 0.2);
    }

    #[test]
    fn test_effective_score_defaults_to_zero() {
        let v = json!({"text": "t"});
        let d = ContextDoc::from_value(&v).unwrap();
        assert_eq!(d.effective_score(), 0.0);
    }
}
