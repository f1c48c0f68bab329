use serde::{Deserialize, Serialize};

use crate::ids::DocId;

/// A single indexed document.
///
/// Created once per successfully crawled and tokenized entry; immutable
/// thereafter. `length` and `unique_term_count` are computed over the
/// anchor-augmented token stream (body tokens plus doubled inbound anchor
/// text), matching how TF-IDF is computed against the same stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Stable short identifier, e.g. `index1234`.
    pub id: DocId,
    /// Path of the originating entry inside the archive.
    pub path: String,
    /// Number of tokens in the document's filtered token stream.
    pub length: usize,
    /// Number of distinct terms in the document.
    pub unique_term_count: usize,
}

impl Document {
    /// Construct a new document record.
    pub fn new(id: DocId, path: impl Into<String>, length: usize, unique_term_count: usize) -> Self {
        Self {
            id,
            path: path.into(),
            length,
            unique_term_count,
        }
    }
}
