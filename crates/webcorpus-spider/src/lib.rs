//! Breadth-first traversal over a ZIP-archived HTML corpus.
//!
//! The crawl runs in two phases: a sequential bulk load of every HTML
//! entry (ZIP random access is expensive; one streaming pass is cheap),
//! then a BFS over that in-memory cache where link extraction — a pure
//! `(url, html) -> links` function — runs on a bounded worker pool. The
//! coordinator (this module) is the only thing that ever mutates the
//! frontier, the visited set, or the anchor inboxes; workers return data,
//! never touch shared state.

mod config;
mod results;

use std::collections::{HashSet, VecDeque};
use std::io::{Read, Seek};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, instrument, warn};
use url::Url;

use webcorpus_archive::ArchiveReader;
use webcorpus_html::{archive_base_url, extract_links, is_html_shaped};
use webcorpus_types::{CoreError, CoreResult};

pub use config::SpiderConfig;
pub use results::CrawledCorpus;

/// Bulk-load every HTML entry from `reader` into memory, decoding lossily.
/// Entries that fail to read are logged and excluded from the cache.
fn load_cache<R: Read + Seek>(
    reader: &mut ArchiveReader<R>,
) -> std::collections::HashMap<String, String> {
    let mut cache = std::collections::HashMap::new();
    for path in reader.list_html_entries() {
        match reader.read_lossy(&path) {
            Ok(text) => {
                cache.insert(path, text);
            }
            Err(err) => {
                warn!(entry = %path, error = %err, "skipping unreadable archive entry");
            }
        }
    }
    cache
}

struct ParsedBatchItem {
    index: usize,
    url: String,
    links: Vec<webcorpus_html::ExtractedLink>,
}

/// Crawl `reader` breadth-first starting from `seed`, according to
/// `config`. Returns [`CoreError::SeedNotFound`] if `seed` is not a
/// readable HTML entry in the archive.
#[instrument(skip(reader), fields(seed = %seed))]
pub async fn crawl<R: Read + Seek>(
    reader: &mut ArchiveReader<R>,
    seed: &str,
    config: SpiderConfig,
) -> CoreResult<CrawledCorpus> {
    let cache = load_cache(reader);
    let seed = seed.trim_start_matches('/').to_string();
    if !cache.contains_key(&seed) {
        return Err(CoreError::seed_not_found(seed));
    }

    let mut corpus = CrawledCorpus::default();
    corpus.report.unique_urls_discovered = 1;

    let mut discovered: HashSet<String> = HashSet::new();
    let mut visited: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<String> = VecDeque::new();
    discovered.insert(seed.clone());
    queue.push_back(seed);

    let semaphore = Arc::new(Semaphore::new(config.workers.max(1)));

    while !queue.is_empty() && corpus.report.pages_crawled < config.max_pages {
        let remaining_budget = config.max_pages - corpus.report.pages_crawled;
        let batch_cap = config.batch_size().min(remaining_budget.max(1));

        let mut batch: Vec<(String, String)> = Vec::new();
        while batch.len() < batch_cap {
            let Some(url) = queue.pop_front() else {
                break;
            };
            if visited.contains(&url) {
                continue;
            }
            visited.insert(url.clone());
            match cache.get(&url) {
                Some(html) => batch.push((url, html.clone())),
                None => {
                    corpus.report.pages_skipped += 1;
                }
            }
        }

        if batch.is_empty() {
            if queue.is_empty() {
                break;
            }
            continue;
        }

        let mut join_set: JoinSet<CoreResult<ParsedBatchItem>> = JoinSet::new();
        for (index, (url, html)) in batch.iter().cloned().enumerate() {
            let permit = Arc::clone(&semaphore)
                .acquire_owned()
                .await
                .expect("worker semaphore is never closed");
            join_set.spawn_blocking(move || {
                let _permit = permit;
                let base = archive_base_url(&url);
                let links = extract_links(&html, base.as_ref());
                Ok(ParsedBatchItem { index, url, links })
            });
        }

        let mut results: Vec<ParsedBatchItem> = Vec::with_capacity(batch.len());
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok(Ok(item)) => results.push(item),
                Ok(Err(err)) => warn!(error = %err, "link extraction failed"),
                Err(join_err) => warn!(error = %join_err, "parsing worker panicked"),
            }
        }
        results.sort_by_key(|item| item.index);

        for item in results {
            let html = cache.get(&item.url).cloned().unwrap_or_default();
            corpus.documents.insert(item.url.clone(), html);
            corpus.report.pages_crawled += 1;

            for link in &item.links {
                if !is_html_shaped(&link.target) {
                    continue;
                }
                corpus.report.total_links_found += 1;

                if !link.anchor_text.is_empty() {
                    corpus
                        .anchor_inbox
                        .entry(link.target.clone())
                        .or_default()
                        .push(link.anchor_text.clone());
                }

                if discovered.insert(link.target.clone()) {
                    corpus.report.unique_urls_discovered += 1;
                    queue.push_back(link.target.clone());
                }
            }
        }
    }

    corpus.report.urls_with_anchor_texts = corpus.anchor_inbox.len();

    debug!(
        pages_crawled = corpus.report.pages_crawled,
        pages_skipped = corpus.report.pages_skipped,
        urls_with_anchor_texts = corpus.report.urls_with_anchor_texts,
        "crawl complete"
    );
    Ok(corpus)
}

/// Resolve an archive-relative path into a base [`Url`] suitable for link
/// resolution. Exposed so callers (e.g. the facade crate's seed handling)
/// can build a base without depending on `webcorpus-html` directly.
pub fn base_url_for(path: &str) -> Option<Url> {
    archive_base_url(path)
}
