/// Tunables for a crawl.
///
/// Mirrors the builder-configured knobs a crawler needs without exposing
/// unrelated concerns (robots.txt, session state, pluggable extraction
/// strategies) that this corpus-local crawler has no use for.
#[derive(Debug, Clone, Copy)]
pub struct SpiderConfig {
    /// Crawl stops once this many documents have been fetched.
    pub max_pages: usize,
    /// Number of concurrent parsing workers. Batch size is `workers * 4`.
    pub workers: usize,
}

impl Default for SpiderConfig {
    fn default() -> Self {
        Self {
            max_pages: usize::MAX,
            workers: 4,
        }
    }
}

impl SpiderConfig {
    /// The number of URLs popped from the frontier per batch.
    pub fn batch_size(&self) -> usize {
        self.workers.max(1) * 4
    }
}
