//! Inverted-index construction and query evaluation.
//!
//! Consumes a [`webcorpus_spider::CrawledCorpus`] and produces an
//! [`Index`]: a document table, a TF-IDF-weighted positional posting
//! dictionary, and a five-plan query evaluator.

mod build;
mod doc_id;
mod index;
mod query;

pub use build::build_index;
pub use index::Index;
pub use query::{describe_query, parse_query, QueryPlan, SearchHit, SearchOutcome};
