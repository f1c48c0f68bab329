use std::collections::HashMap;

use webcorpus_types::{CrawlReport, Document, DocId, IndexStats, PostingList};

use crate::query::{self, SearchOutcome};

/// A built index: a document table, a term dictionary of TF-IDF-weighted
/// positional postings, and the global (informational) URL set collected
/// across all crawled documents.
///
/// Built once by [`crate::build_index`]; read-only and safe to share across
/// concurrent queries thereafter.
#[derive(Debug, Clone, Default)]
pub struct Index {
    pub(crate) documents: HashMap<DocId, Document>,
    pub(crate) path_to_id: HashMap<String, DocId>,
    pub(crate) dictionary: HashMap<String, PostingList>,
    pub(crate) urls: Vec<String>,
    pub(crate) anchor_inbox: HashMap<String, Vec<String>>,
    pub(crate) avg_doc_length: f64,
    pub(crate) crawl_report: CrawlReport,
}

impl Index {
    /// Look up a document's original archive path from its id.
    pub fn document_path(&self, doc_id: &DocId) -> Option<&str> {
        self.documents.get(doc_id).map(|d| d.path.as_str())
    }

    /// Look up a document's id from its original archive path.
    pub fn doc_id_for_path(&self, path: &str) -> Option<&DocId> {
        self.path_to_id.get(path)
    }

    /// Fetch a document record by id.
    pub fn document(&self, doc_id: &DocId) -> Option<&Document> {
        self.documents.get(doc_id)
    }

    /// The posting list for `term`, if the term appears in the index.
    pub fn postings_for(&self, term: &str) -> Option<&PostingList> {
        self.dictionary.get(term)
    }

    /// The anchor texts observed pointing at `doc_id`, in crawl order.
    pub fn anchor_texts(&self, doc_id: &DocId) -> Vec<String> {
        self.document_path(doc_id)
            .and_then(|path| self.anchor_inbox.get(path))
            .cloned()
            .unwrap_or_default()
    }

    /// Total number of documents in the index.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// The spider's crawl-time diagnostic counters.
    pub fn crawl_report(&self) -> CrawlReport {
        self.crawl_report
    }

    /// Summary statistics over this index.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            file_count: self.documents.len(),
            vocabulary_size: self.dictionary.len(),
            url_count: self.urls.len(),
            avg_doc_length: self.avg_doc_length,
            anchor_inbox_count: self.anchor_inbox.len(),
        }
    }

    /// Parse and evaluate `query`, returning its ranked hits and true
    /// match count.
    pub fn query(&self, query: &str) -> SearchOutcome {
        query::process_query(self, query)
    }

    /// A human-readable description of how `query` will be evaluated.
    pub fn describe_query(&self, query: &str) -> String {
        query::describe_query(query)
    }

    /// The legacy `!term` shortcut: every document containing `term`,
    /// unscored, in document-id order.
    pub fn legacy_search(&self, term: &str) -> Vec<DocId> {
        query::legacy_search(self, &term.to_lowercase())
    }
}
