//! Query parsing and evaluation.

mod eval;
mod parser;

pub use eval::{legacy_search, SearchHit, SearchOutcome};
pub use parser::{describe_query, parse_query, QueryPlan};

use crate::index::Index;

/// Evaluate a raw query string against `index`, dispatching to the plan
/// [`parse_query`] selects.
///
/// A leading `!` is checked before the five-way dispatch and short-circuits
/// to the legacy exact-match path (unscored, see [`Index::legacy_search`]),
/// matching the original console tool's `search_and_display` behavior. Its
/// hits carry a score of `0.0` and still go through top-K truncation like
/// every other plan.
pub fn process_query(index: &Index, query: &str) -> SearchOutcome {
    let trimmed = query.trim();
    if let Some(term) = trimmed.strip_prefix('!') {
        let hits = eval::legacy_search(index, &term.trim().to_lowercase())
            .into_iter()
            .map(|doc_id| SearchHit { doc_id, score: 0.0 })
            .collect();
        return eval::finalize(hits);
    }

    match parse_query(query) {
        QueryPlan::Phrase(terms) => eval::phrase_search(index, &terms),
        QueryPlan::Or(terms) => eval::or_search(index, &terms),
        QueryPlan::And(terms) => eval::and_search(index, &terms),
        QueryPlan::Difference { include, exclude } => {
            eval::difference_search(index, &include, &exclude)
        }
        QueryPlan::Vector(terms) => eval::vector_space_search(index, &terms),
    }
}
