/// Domain synonym table, in declaration order. Each key that appears as a
/// case-insensitive substring of the query contributes its full synonym list.
/// Kept as static data rather than code branches so it is independently
/// testable and extensible.
pub const EXPANSIONS: &[(&str, &[&str])] = &[
    (
        "faculty",
        &["professor", "teacher", "instructor", "staff", "lecturer"],
    ),
    ("course", &["subject", "class", "curriculum", "paper"]),
    (
        "research",
        &["publication", "project", "work", "area", "interest"],
    ),
    ("phd", &["doctorate", "doctoral", "research scholar", "ph.d"]),
    ("mtech", &["m.tech", "masters", "postgraduate"]),
    ("btech", &["b.tech", "bachelor", "undergraduate"]),
    ("contact", &["email", "phone", "office", "reach"]),
    ("teach", &["teaching", "teaches", "instructor", "course"]),
    ("lab", &["laboratory", "research group", "facility"]),
];

/// Expand a query with domain synonyms to widen retrieval recall.
///
/// Output is the original query followed by the synonyms of every matched
/// key, space-joined, in table order. NOT idempotent: expanding an
/// already-expanded query may match additional keys, so callers must expand
/// the original query exactly once.
pub fn expand(query: &str) -> String {
    let query_lower = query.to_lowercase();

    let mut terms: Vec<&str> = vec![query];
    for (key, synonyms) in EXPANSIONS {
        if query_lower.contains(key) {
            terms.extend(synonyms.iter().copied());
        }
    }

    terms.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faculty_expansion_in_order() {
        let expanded = expand("faculty list");
        assert_eq!(
            expanded,
            "faculty list professor teacher instructor staff lecturer"
        );
    }

    #[test]
    fn test_case_insensitive_match() {
        let expanded = expand("PhD admission");
        assert!(expanded.contains("doctorate"));
        assert!(expanded.contains("research scholar"));
    }

    #[test]
    fn test_multiple_keys_concatenate_in_table_order() {
        let expanded = expand("faculty contact");
        // faculty synonyms precede contact synonyms
        let prof = expanded.find("professor").unwrap();
        let email = expanded.find("email").unwrap();
        assert!(prof < email);
    }

    #[test]
    fn test_no_match_returns_original() {
        assert_eq!(expand("library timings"), "library timings");
    }

    #[test]
    fn test_substring_key_match() {
        // "teach" matches inside "teaches"
        let expanded = expand("who teaches algorithms");
        assert!(expanded.contains("teaching"));
    }

    #[test]
    fn test_monotonic_in_token_count() {
        let queries = ["faculty", "research lab work", "hello", ""];
        for q in queries {
            let expanded = expand(q);
            assert!(
                expanded.split_whitespace().count() >= q.split_whitespace().count(),
                "expansion shrank {q:?}"
            );
        }
    }

    #[test]
    fn test_original_query_comes_first() {
        let expanded = expand("course catalog");
        assert!(expanded.starts_with("course catalog "));
    }
}
