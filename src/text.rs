use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));
static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s.,!?;:()\-]").expect("character filter regex"));

/// Clean and normalize text before embedding: collapse whitespace runs
/// (including newlines and tabs) to a single space, strip characters outside
/// word characters, whitespace, and basic punctuation, then trim.
///
/// Must be applied identically to corpus text and query text so both land in
/// the same embedding space. Never fails; empty input yields empty output.
pub fn normalize(text: &str) -> String {
    let collapsed = WHITESPACE.replace_all(text, " ");
    let cleaned = DISALLOWED.replace_all(&collapsed, "");
    cleaned.trim().to_string()
}
