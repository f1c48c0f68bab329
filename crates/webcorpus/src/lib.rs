//! Facade crate wiring the webcorpus pipeline together.
//!
//! This is the only crate an external presenter (CLI, web UI, test
//! harness) should depend on directly: it owns no logic of its own beyond
//! sequencing `webcorpus-archive` -> `webcorpus-spider` -> `webcorpus-index`
//! behind a single [`build`] entry point.

use std::path::Path;

use anyhow::Context;

use webcorpus_archive::ArchiveReader;
use webcorpus_spider::SpiderConfig;

pub use webcorpus_index::{describe_query, Index, QueryPlan, SearchHit, SearchOutcome};
pub use webcorpus_spider::SpiderConfig as CrawlConfig;
pub use webcorpus_types::{CoreError, CoreResult, CrawlReport, DocId, Document, IndexStats};

/// Crawl `archive_path` from `seed_path` with the default [`SpiderConfig`]
/// and build a queryable [`Index`] from the result.
///
/// This is the single entry point external presenters should use; it
/// bottoms out in [`build_with_config`].
#[tracing::instrument(skip_all, fields(archive = %archive_path.as_ref().display(), seed = %seed_path))]
pub async fn build(archive_path: impl AsRef<Path>, seed_path: &str) -> anyhow::Result<Index> {
    build_with_config(archive_path, seed_path, SpiderConfig::default()).await
}

/// Same as [`build`], but with an explicit [`SpiderConfig`] (e.g. to cap
/// `max_pages` or tune worker count).
pub async fn build_with_config(
    archive_path: impl AsRef<Path>,
    seed_path: &str,
    config: SpiderConfig,
) -> anyhow::Result<Index> {
    let archive_path = archive_path.as_ref();
    let mut reader = ArchiveReader::open(archive_path)
        .with_context(|| format!("opening archive at {}", archive_path.display()))?;

    let corpus = webcorpus_spider::crawl(&mut reader, seed_path, config)
        .await
        .with_context(|| format!("crawling from seed {seed_path}"))?;

    tracing::info!(
        pages_crawled = corpus.report.pages_crawled,
        pages_skipped = corpus.report.pages_skipped,
        "crawl finished, building index"
    );

    Ok(webcorpus_index::build_index(corpus))
}

/// Build an [`Index`] directly from an already-loaded archive reader.
///
/// Exposed for callers that already hold archive bytes in memory (e.g.
/// tests building a fixture with the `zip` crate, or a presenter that
/// downloaded the archive itself rather than reading it from disk).
pub async fn build_from_reader<R: std::io::Read + std::io::Seek>(
    reader: &mut ArchiveReader<R>,
    seed_path: &str,
    config: SpiderConfig,
) -> anyhow::Result<Index> {
    let corpus = webcorpus_spider::crawl(reader, seed_path, config)
        .await
        .with_context(|| format!("crawling from seed {seed_path}"))?;
    Ok(webcorpus_index::build_index(corpus))
}
