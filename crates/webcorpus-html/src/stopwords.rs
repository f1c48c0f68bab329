use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Closed stop-word list. Matches the original indexer's default set
/// exactly; tokens in this set never reach the index.
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is", "it",
    "its", "of", "on", "that", "the", "to", "was", "will", "with", "you", "your", "this", "but",
    "or", "not", "have", "had", "what", "when", "where", "who", "which", "why", "how", "all",
    "any", "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "only",
    "own", "same", "so", "than", "too", "very", "can", "may", "should", "would", "could",
];

static STOP_WORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOP_WORDS.iter().copied().collect());

/// Leading/trailing punctuation characters stripped from each raw word
/// before it is considered for indexing.
const PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':', '"', '(', ')', '[', ']', '{', '}'];

/// Whether `word` (already lowercased) is in the stop-word list.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORD_SET.contains(word)
}

/// Strip leading and trailing punctuation from `raw`.
pub fn strip_punctuation(raw: &str) -> &str {
    raw.trim_matches(|c| PUNCTUATION.contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_stop_words() {
        assert!(is_stop_word("the"));
        assert!(is_stop_word("and"));
        assert!(!is_stop_word("search"));
    }

    #[test]
    fn strips_enclosing_punctuation() {
        assert_eq!(strip_punctuation("(hello)."), "hello");
        assert_eq!(strip_punctuation("\"quoted\""), "quoted");
    }
}
