use std::collections::HashSet;

use serde_json::Value;

use crate::error::Error;
use crate::models::{RankedResult, ScoreBreakdown, ScoredCandidate};

/// Weight of the vector-similarity signal.
const VECTOR_WEIGHT: f64 = 0.50;
/// Weight of the keyword-overlap signal.
const KEYWORD_WEIGHT: f64 = 0.25;
/// Flat bonus when the full query appears verbatim in the candidate.
const EXACT_MATCH_BONUS: f64 = 0.15;
/// Weight of the length penalty.
const LENGTH_WEIGHT: f64 = 0.05;
/// Flat bonus for the first chunk of a source document.
const POSITION_BONUS: f64 = 0.05;
/// Word count at which the length penalty starts to bite.
const LENGTH_SATURATION_WORDS: f64 = 250.0;

/// Re-rank vector-search candidates by a blended relevance score.
///
/// Signals per candidate (text comparisons on lowercased strings):
/// - vector similarity `1 - vector_distance`. The distance is assumed to be
///   in [0, 1] (cosine-style) and is NOT clamped; a metric exceeding 1
///   produces a negative similarity component.
/// - keyword overlap: `|query_words ∩ candidate_words| / |query_words|`
/// - exact phrase bonus: the raw lowercased query as a substring of the
///   candidate (no punctuation normalization before the check)
/// - length penalty: saturates at 1.0 for candidates of 250 words or fewer
/// - position bonus: `metadata.chunk_id == 0`
///
/// Results are sorted by `final_score` descending with a stable sort, so
/// ties preserve input order. Returns at most `top_k` results.
pub fn rerank(
    query: &str,
    candidates: Vec<ScoredCandidate>,
    top_k: usize,
) -> Result<Vec<RankedResult>, Error> {
    if query.trim().is_empty() {
        return Err(Error::InvalidInput("Query and results required".into()));
    }
    if candidates.is_empty() {
        return Err(Error::InvalidInput("Query and results required".into()));
    }

    let query_lower = query.to_lowercase();
    let query_words: HashSet<&str> = query_lower.split_whitespace().collect();

    let mut results: Vec<RankedResult> = candidates
        .into_iter()
        .map(|c| score_candidate(&query_lower, &query_words, c))
        .collect();

    // Stable sort: equal scores keep their input order
    results.sort_by(|a, b| {
        b.final_score
            .partial_cmp(&a.final_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    results.truncate(top_k);

    Ok(results)
}

fn score_candidate(
    query_lower: &str,
    query_words: &HashSet<&str>,
    candidate: ScoredCandidate,
) -> RankedResult {
    let text_lower = candidate.text.to_lowercase();
    let text_word_count = candidate.text.split_whitespace().count();

    let vector = 1.0 - candidate.vector_distance;

    let keyword = if query_words.is_empty() {
        0.0
    } else {
        let text_words: HashSet<&str> = text_lower.split_whitespace().collect();
        let overlap = query_words.intersection(&text_words).count();
        overlap as f64 / query_words.len() as f64
    };

    let exact_match = if text_lower.contains(query_lower) {
        EXACT_MATCH_BONUS
    } else {
        0.0
    };

    let length = (LENGTH_SATURATION_WORDS / text_word_count.max(1) as f64).min(1.0);

    let position = if is_first_chunk(&candidate.metadata) {
        POSITION_BONUS
    } else {
        0.0
    };

    let final_score = VECTOR_WEIGHT * vector
        + KEYWORD_WEIGHT * keyword
        + exact_match
        + LENGTH_WEIGHT * length
        + position;

    RankedResult {
        text: candidate.text,
        metadata: candidate.metadata,
        vector_distance: candidate.vector_distance,
        final_score,
        score_breakdown: ScoreBreakdown {
            vector,
            keyword,
            exact_match,
            length,
            position,
        },
    }
}

/// The first chunk of a source document is assumed more likely to carry key
/// facts. Only an integer `chunk_id` of 0 qualifies.
fn is_first_chunk(metadata: &serde_json::Map<String, Value>) -> bool {
    metadata.get("chunk_id").and_then(Value::as_i64) == Some(0)
}
