use serde::{Deserialize, Serialize};

/// Summary statistics over a built index, exposed for diagnostics and
/// display by a presenter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IndexStats {
    /// Number of documents in the index.
    pub file_count: usize,
    /// Number of distinct terms in the dictionary.
    pub vocabulary_size: usize,
    /// Number of distinct URLs observed (crawled + link-referenced).
    pub url_count: usize,
    /// Mean document length across all documents.
    pub avg_doc_length: f64,
    /// Number of targets that received at least one inbound anchor text.
    pub anchor_inbox_count: usize,
}

/// Diagnostic counters accumulated by the spider during a crawl.
///
/// A strict superset of what [`IndexStats`] needs: useful on its own for a
/// presenter that wants to report crawl progress independent of indexing.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CrawlReport {
    /// Number of documents successfully fetched and parsed.
    pub pages_crawled: usize,
    /// Total number of outbound links observed across all crawled pages.
    pub total_links_found: usize,
    /// Number of distinct URLs discovered (queued or visited).
    pub unique_urls_discovered: usize,
    /// Number of distinct targets that received at least one non-empty
    /// inbound anchor text during the crawl.
    pub urls_with_anchor_texts: usize,
    /// Number of entries skipped due to a read or parse failure.
    pub pages_skipped: usize,
}
