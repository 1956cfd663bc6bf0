//! Topic extraction for encyclopedia lookups.
//!
//! The topic heuristic is deliberately crude: it keeps the last "long"
//! alphabetic word of the query. It is not NLP-accurate, but the chain's
//! user-facing messages depend on it, so it is reproduced exactly.

/// Extract the normalized lookup topic from a query.
///
/// Rules:
/// - only alphabetic words count;
/// - the last word longer than 3 characters wins;
/// - if no word is longer than 3 characters, the last alphabetic word wins;
/// - if the query has no alphabetic word at all, there is no topic.
///
/// The winning word is normalized to title case with spaces replaced by
/// underscores, matching the encyclopedia's page naming.
pub fn extract_topic(query: &str) -> Option<String> {
    let words = alphabetic_words(query);
    if words.is_empty() {
        return None;
    }

    let topic = words
        .iter()
        .rev()
        .find(|w| w.len() > 3)
        .copied()
        .unwrap_or_else(|| words[words.len() - 1]);

    Some(normalize_topic(topic))
}

/// Split a query into its maximal alphabetic runs.
fn alphabetic_words(query: &str) -> Vec<&str> {
    query
        .split(|c: char| !c.is_ascii_alphabetic())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Title-case a topic word and replace spaces with underscores.
fn normalize_topic(word: &str) -> String {
    let mut chars = word.chars();
    let normalized = match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    };
    normalized.replace(' ', "_")
}
