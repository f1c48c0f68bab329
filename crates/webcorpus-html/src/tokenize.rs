use scraper::Html;

use crate::stopwords::{is_stop_word, strip_punctuation};

/// Extract the visible text of an HTML document as a single
/// whitespace-joined string, in document order.
pub fn extract_visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    document
        .root_element()
        .text()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split `text` into the filtered, positioned token stream used for
/// indexing: whitespace-split, punctuation-stripped, lowercased,
/// ASCII-alphabetic-only, stop-words removed.
pub fn tokenize_text(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter_map(|raw| {
            let stripped = strip_punctuation(raw);
            let lower = stripped.to_lowercase();
            if lower.is_empty() || !lower.chars().all(|c| c.is_ascii_alphabetic()) {
                return None;
            }
            if is_stop_word(&lower) {
                return None;
            }
            Some(lower)
        })
        .collect()
}

/// Tokenize a document's body text, tolerant of an empty anchor list.
///
/// When `anchors` is non-empty, the anchor texts are space-joined and
/// appended to the body text **twice** before tokenizing, so inbound anchor
/// terms get a 2x term-frequency boost. Positions for the appended tokens
/// therefore continue naturally from the end of the body tokens, since the
/// whole string is tokenized as one pass.
pub fn tokenize_document(html: &str, anchors: &[String]) -> Vec<String> {
    let body = extract_visible_text(html);
    if anchors.is_empty() {
        return tokenize_text(&body);
    }
    let joined = anchors.join(" ");
    let combined = format!("{body} {joined} {joined}");
    tokenize_text(&combined)
}
