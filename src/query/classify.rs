use serde::Serialize;

/// Query intent categories, checked in fixed priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    PersonSearch,
    InfoSearch,
    Explanation,
    ListQuery,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

/// Classification result plus recommended retrieval parameters.
#[derive(Debug, Clone, Serialize)]
pub struct QueryAnalysis {
    pub query_type: QueryType,
    pub suggested_top_k: usize,
    pub suggested_expand: bool,
    pub word_count: usize,
    pub complexity: Complexity,
}

/// Keyword sets per type, in priority order. Matching is substring
/// containment on the lowercased query; the first set with any hit wins.
const RULES: &[(QueryType, &[&str])] = &[
    (QueryType::PersonSearch, &["who", "name", "faculty", "professor"]),
    (QueryType::InfoSearch, &["what", "which", "course", "subject"]),
    (QueryType::Explanation, &["how", "explain", "describe"]),
    (QueryType::ListQuery, &["list", "all", "every"]),
];

/// Fixed `(top_k, expand_query)` recommendation per query type.
const SUGGESTIONS: &[(QueryType, usize, bool)] = &[
    (QueryType::PersonSearch, 3, true),
    (QueryType::InfoSearch, 5, true),
    (QueryType::Explanation, 5, false),
    (QueryType::ListQuery, 10, true),
    (QueryType::General, 5, true),
];

/// Categorize a query's intent and recommend retrieval parameters.
/// Pure function: reproducible byte-for-byte given the same query.
pub fn classify(query: &str) -> QueryAnalysis {
    let query_lower = query.to_lowercase();

    let query_type = RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| query_lower.contains(k)))
        .map(|(t, _)| *t)
        .unwrap_or(QueryType::General);

    let (suggested_top_k, suggested_expand) = SUGGESTIONS
        .iter()
        .find(|(t, _, _)| *t == query_type)
        .map(|(_, k, e)| (*k, *e))
        .unwrap_or((5, true));

    let word_count = query.split_whitespace().count();
    let complexity = if word_count > 10 {
        Complexity::High
    } else if word_count > 5 {
        Complexity::Medium
    } else {
        Complexity::Low
    };

    QueryAnalysis {
        query_type,
        suggested_top_k,
        suggested_expand,
        word_count,
        complexity,
    }
}
