use serde::{Deserialize, Serialize};

use crate::ids::DocId;

/// A single term occurrence record within one document.
///
/// `positions` is strictly increasing and its length always equals
/// `term_frequency`; both invariants are established when the posting is
/// built and never touched afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Posting {
    /// Document this posting belongs to.
    pub doc_id: DocId,
    /// Raw count of the term in the document's token stream.
    pub term_frequency: usize,
    /// TF-IDF weight of the term in this document.
    pub tf_idf: f64,
    /// 0-based positions of the term in the document's token stream.
    pub positions: Vec<usize>,
}

impl Posting {
    /// Construct a new posting.
    pub fn new(doc_id: DocId, term_frequency: usize, tf_idf: f64, positions: Vec<usize>) -> Self {
        Self {
            doc_id,
            term_frequency,
            tf_idf,
            positions,
        }
    }
}

/// All postings for a single term, ordered by TF-IDF descending and then
/// document-id ascending (the tie-break applied when scores are equal, e.g.
/// when a term's IDF is zero because it appears in every document).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostingList {
    /// The term this list indexes.
    pub term: String,
    /// Postings for this term, already sorted for consumption.
    pub postings: Vec<Posting>,
}

impl PostingList {
    /// Construct a posting list, sorting its postings by the indexer's
    /// ranking rule (TF-IDF descending, document-id ascending on ties).
    pub fn new(term: impl Into<String>, mut postings: Vec<Posting>) -> Self {
        postings.sort_by(|a, b| {
            b.tf_idf
                .partial_cmp(&a.tf_idf)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.doc_id.cmp(&b.doc_id))
        });
        Self {
            term: term.into(),
            postings,
        }
    }

    /// Document frequency: the number of documents containing this term.
    pub fn document_frequency(&self) -> usize {
        self.postings.len()
    }
}
