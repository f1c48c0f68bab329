//! Shared error and data types for the webcorpus search engine.
//!
//! This crate has no logic of its own; it exists so that
//! `webcorpus-archive`, `webcorpus-html`, `webcorpus-spider` and
//! `webcorpus-index` can agree on a common vocabulary without depending on
//! each other.

mod document;
mod error;
mod ids;
mod posting;
mod stats;

pub use document::Document;
pub use error::{CoreError, CoreResult};
pub use ids::DocId;
pub use posting::{Posting, PostingList};
pub use stats::{CrawlReport, IndexStats};
