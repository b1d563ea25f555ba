//! Integration tests for the retrieval-support pipeline.
//!
//! These tests exercise the full query-understanding, re-ranking, and
//! prompt-assembly flow without requiring a running LLM (embedding and
//! generation are skipped or run through the hashed vectorizer).

use serde_json::json;

use rag_gateway::llm::hashed::HashedVectorizer;
use rag_gateway::models::{ContextDoc, ScoredCandidate};
use rag_gateway::prompt::{build_context, build_prompt};
use rag_gateway::query::classify::{classify, QueryType};
use rag_gateway::query::expand::expand;
use rag_gateway::rerank::rerank;
use rag_gateway::text::normalize;

/// Helper: candidates simulating vector-search hits over a department corpus.
fn department_candidates() -> Vec<ScoredCandidate> {
    let hits = vec![
        json!({
            "text": "Dr. Rao teaches Machine Learning and AI",
            "metadata": {"chunk_id": 0, "source": "faculty.pdf"},
            "score": 0.1
        }),
        json!({
            "text": "The library is open 9-5",
            "metadata": {"chunk_id": 2, "source": "campus.pdf"},
            "score": 0.8
        }),
        json!({
            "text": "CS501 Machine Learning is a core postgraduate course",
            "metadata": {"chunk_id": 1, "source": "courses.pdf"},
            "score": 0.3
        }),
    ];
    hits.iter()
        .map(|v| ScoredCandidate::from_value(v).unwrap())
        .collect()
}

#[test]
fn test_query_understanding_to_rerank_flow() {
    let raw_query = "Who teaches Machine Learning?";

    // Analyze: person search, small top_k, expansion recommended
    let analysis = classify(raw_query);
    assert_eq!(analysis.query_type, QueryType::PersonSearch);
    assert_eq!(analysis.suggested_top_k, 3);
    assert!(analysis.suggested_expand);

    // Expand once, then normalize the way corpus text is normalized
    let expanded = expand(raw_query);
    assert!(expanded.starts_with(raw_query));
    assert!(expanded.contains("teaching"));
    let processed = normalize(&expanded);
    assert_eq!(normalize(&processed), processed);

    // Re-rank raw hits with the original query
    let results = rerank(raw_query, department_candidates(), analysis.suggested_top_k).unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].text, "Dr. Rao teaches Machine Learning and AI");
    assert!(results[0].final_score > 0.6);
    let library = results
        .iter()
        .find(|r| r.text.contains("library"))
        .unwrap();
    assert!(library.final_score < 0.3);
}

#[test]
fn test_rerank_to_grounded_prompt_flow() {
    let query = "Who teaches Machine Learning?";
    let ranked = rerank(query, department_candidates(), 2).unwrap();

    // Feed ranked passages into the prompt builder the way the orchestrator
    // would: text + final_score
    let docs: Vec<ContextDoc> = ranked
        .iter()
        .map(|r| {
            ContextDoc::from_value(&json!({
                "text": r.text,
                "metadata": r.metadata,
                "final_score": r.final_score
            }))
            .unwrap()
        })
        .collect();

    let prompt = build_prompt("a department assistant", query, &docs);
    assert!(prompt.contains("Context 1 [Relevance:"));
    assert!(prompt.contains("Dr. Rao teaches Machine Learning and AI"));
    assert!(prompt.contains("USER QUESTION: Who teaches Machine Learning?"));
    assert!(prompt.contains("Answer ONLY based on the context provided above"));

    // Best-ranked passage appears first in the context section
    let rao = prompt.find("Dr. Rao").unwrap();
    let other = prompt.find("CS501").unwrap_or(usize::MAX);
    assert!(rao < other);
}

#[test]
fn test_empty_context_uses_placeholder() {
    let prompt = build_prompt("an assistant", "anything", &[]);
    assert!(prompt.contains("No specific context provided."));
    assert_eq!(build_context(&[]), "No specific context provided.");
}

#[test]
fn test_list_query_analysis() {
    let analysis = classify("list all courses offered");
    assert_eq!(analysis.query_type, QueryType::ListQuery);
    assert_eq!(analysis.suggested_top_k, 10);
}

#[test]
fn test_classifier_priority_person_over_list() {
    let analysis = classify("who are all the faculty");
    assert_eq!(analysis.query_type, QueryType::PersonSearch);
}

#[test]
fn test_rerank_top_k_bounds() {
    let candidates = department_candidates();
    let n = candidates.len();
    let results = rerank("machine learning", candidates.clone(), 2).unwrap();
    assert_eq!(results.len(), 2);
    let results = rerank("machine learning", candidates, 10).unwrap();
    assert_eq!(results.len(), n);
}

#[test]
fn test_hashed_vectorizer_degraded_pipeline() {
    // Degraded mode: fit on a small corpus, then embed an expanded query
    let corpus: Vec<String> = department_candidates()
        .into_iter()
        .map(|c| normalize(&c.text))
        .collect();

    let vectorizer = HashedVectorizer::new(256);
    assert!(vectorizer.encode(&corpus, true).is_err());

    vectorizer.fit(&corpus);
    let query = normalize(&expand("who teaches machine learning"));
    let vectors = vectorizer.encode(&[query], true).unwrap();
    assert_eq!(vectors.len(), 1);
    assert_eq!(vectors[0].len(), 256);
    let norm: f32 = vectors[0].iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() < 1e-5);
}

#[test]
fn test_malformed_candidate_fails_whole_batch() {
    let good = json!({"text": "fine", "score": 0.2});
    let bad = json!({"score": 0.3});
    let parsed: Result<Vec<_>, _> = [good, bad].iter().map(ScoredCandidate::from_value).collect();
    assert!(parsed.is_err());
}
