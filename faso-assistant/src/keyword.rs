//! Degraded-mode keyword search over flat text lines.
//!
//! When the semantic pipeline is unavailable the assistant scans a plain
//! list of source lines instead. Availability over precision: matches are
//! returned in stored order, not ranked.

use std::sync::LazyLock;

use regex::Regex;

/// Lowercase words of at least three characters, Unicode-aware so
/// accented French words tokenize whole.
static QUERY_TOKENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w{3,}").unwrap());

/// Return up to `max_results` lines containing any query token as a
/// case-insensitive substring, in first-encountered order.
pub fn find_snippets(query: &str, lines: &[String], max_results: usize) -> Vec<String> {
    let query_lower = query.to_lowercase();
    let tokens: Vec<&str> = QUERY_TOKENS.find_iter(&query_lower).map(|m| m.as_str()).collect();
    if tokens.is_empty() || max_results == 0 {
        return Vec::new();
    }

    let mut results = Vec::new();
    for line in lines {
        let line_lower = line.to_lowercase();
        if tokens.iter().any(|token| line_lower.contains(token)) {
            results.push(line.clone());
            if results.len() >= max_results {
                break;
            }
        }
    }
    results
}
