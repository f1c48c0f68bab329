use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

static PHRASE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]+)""#).unwrap());
static OR_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(\w+)\s+or\s+(\w+)\b").unwrap());
static AND_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(\w+)\s+and\s+(\w+)\b").unwrap());
static BUT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(\w+)\s+but\s+(\w+)\b").unwrap());

/// One of the five ranked query shapes a raw query string can parse into.
///
/// The legacy `!term` shortcut (§ see `Index::legacy_search`) is handled
/// before this dispatch runs and never produces a `QueryPlan`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryPlan {
    /// An exact ordered phrase, e.g. `"quick brown fox"`.
    Phrase(Vec<String>),
    /// `a or b` — union of matches, scored by best term.
    Or(Vec<String>),
    /// `a and b` — intersection of matches, scored by summed terms.
    And(Vec<String>),
    /// `a but b` — documents containing `include`, minus those containing `exclude`.
    Difference { include: String, exclude: String },
    /// Free-form vector-space query (the default).
    Vector(Vec<String>),
}

/// Parse a raw query string into a [`QueryPlan`], trying each shape in the
/// order the original query language defines: phrase, then OR, then AND,
/// then difference ("but"), falling back to vector-space.
pub fn parse_query(query: &str) -> QueryPlan {
    let trimmed = query.trim();

    if let Some(caps) = PHRASE_PATTERN.captures(trimmed) {
        let phrase = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let words = phrase
            .split_whitespace()
            .map(|w| w.to_lowercase())
            .collect();
        return QueryPlan::Phrase(words);
    }

    if OR_PATTERN.is_match(trimmed) {
        return QueryPlan::Or(connector_terms(trimmed, "or"));
    }

    if AND_PATTERN.is_match(trimmed) {
        return QueryPlan::And(connector_terms(trimmed, "and"));
    }

    if let Some(caps) = BUT_PATTERN.captures(trimmed) {
        let include = caps.get(1).map(|m| m.as_str()).unwrap_or_default().to_lowercase();
        let exclude = caps.get(2).map(|m| m.as_str()).unwrap_or_default().to_lowercase();
        return QueryPlan::Difference { include, exclude };
    }

    QueryPlan::Vector(
        trimmed
            .split_whitespace()
            .map(|w| w.to_lowercase())
            .collect(),
    )
}

/// Every distinct lowercased word in `query` except the connector itself
/// (`or`/`and`), deduplicated and sorted for deterministic iteration.
fn connector_terms(query: &str, connector: &str) -> Vec<String> {
    let set: BTreeSet<String> = query
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .filter(|w| w.as_str() != connector)
        .collect();
    set.into_iter().collect()
}

/// A human-readable description of what a query string will execute as,
/// in the same wording convention as the tool this system was modeled on.
pub fn describe_query(query: &str) -> String {
    match parse_query(query) {
        QueryPlan::Phrase(words) => format!("Phrase search for: \"{}\"", words.join(" ")),
        QueryPlan::Or(terms) => format!("Boolean OR search for: {}", terms.join(" OR ")),
        QueryPlan::And(terms) => format!("Boolean AND search for: {}", terms.join(" AND ")),
        QueryPlan::Difference { include, exclude } => {
            format!("Boolean NOT search: {include} BUT NOT {exclude}")
        }
        QueryPlan::Vector(terms) => format!("Vector space search for: {}", terms.join(" ")),
    }
}
