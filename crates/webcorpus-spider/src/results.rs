use std::collections::HashMap;

use webcorpus_types::CrawlReport;

/// The output of a completed crawl: every document fetched, the anchor
/// text observed pointing at each target, and diagnostic counters.
#[derive(Debug, Clone, Default)]
pub struct CrawledCorpus {
    /// Archive path -> decoded HTML text, for every document the crawl
    /// actually visited (a subset of the archive's HTML entries).
    pub documents: HashMap<String, String>,
    /// Archive path -> ordered list of anchor-text strings observed on
    /// inbound links to that path, in the deterministic order they were
    /// applied during the crawl.
    pub anchor_inbox: HashMap<String, Vec<String>>,
    /// Crawl-time diagnostic counters.
    pub report: CrawlReport,
}
