use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument};

use webcorpus_html::{extract_all_urls, tokenize_document};
use webcorpus_spider::CrawledCorpus;
use webcorpus_types::{Document, DocId, Posting, PostingList};

use crate::doc_id::assign_doc_id;
use crate::index::Index;

struct DocWorkingSet {
    id: DocId,
    doc: Document,
    term_positions: HashMap<String, Vec<usize>>,
}

/// Build an [`Index`] from a completed crawl.
///
/// Two passes: the first tokenizes every document (anchor-augmented) and
/// accumulates document frequency; the second computes TF-IDF for every
/// (term, document) pair now that `N` and each term's document frequency
/// are known.
#[instrument(skip_all, fields(documents = corpus.documents.len()))]
pub fn build_index(corpus: CrawledCorpus) -> Index {
    let mut paths: Vec<String> = corpus.documents.keys().cloned().collect();
    paths.sort();

    let mut used_ids: HashSet<String> = HashSet::new();
    let mut fallback_counter: u32 = 0;

    let mut working: Vec<DocWorkingSet> = Vec::with_capacity(paths.len());
    let mut path_to_id: HashMap<String, DocId> = HashMap::new();
    let mut document_frequency: HashMap<String, usize> = HashMap::new();
    let mut urls: Vec<String> = Vec::new();
    let mut seen_urls: HashSet<String> = HashSet::new();

    for path in &paths {
        let html = &corpus.documents[path];
        let anchors = corpus.anchor_inbox.get(path).cloned().unwrap_or_default();
        let tokens = tokenize_document(html, &anchors);

        let mut term_positions: HashMap<String, Vec<usize>> = HashMap::new();
        for (position, token) in tokens.iter().enumerate() {
            term_positions.entry(token.clone()).or_default().push(position);
        }

        for raw_url in extract_all_urls(html) {
            if seen_urls.insert(raw_url.clone()) {
                urls.push(raw_url);
            }
        }

        for term in term_positions.keys() {
            *document_frequency.entry(term.clone()).or_insert(0) += 1;
        }

        let doc_id = assign_doc_id(path, &mut used_ids, &mut fallback_counter);
        path_to_id.insert(path.clone(), doc_id.clone());

        let doc = Document::new(doc_id.clone(), path.clone(), tokens.len(), term_positions.len());
        working.push(DocWorkingSet {
            id: doc_id,
            doc,
            term_positions,
        });
    }

    let n = working.len() as f64;
    let avg_doc_length = if working.is_empty() {
        0.0
    } else {
        working.iter().map(|w| w.doc.length as f64).sum::<f64>() / n
    };

    let mut postings_by_term: HashMap<String, Vec<Posting>> = HashMap::new();
    let mut documents: HashMap<DocId, Document> = HashMap::with_capacity(working.len());

    for entry in working {
        let doc_length = entry.doc.length.max(1) as f64;
        for (term, positions) in &entry.term_positions {
            let tf = positions.len();
            let df = *document_frequency.get(term).unwrap_or(&0);
            let tf_idf = calculate_tf_idf(tf, doc_length, df, n);
            postings_by_term.entry(term.clone()).or_default().push(Posting::new(
                entry.id.clone(),
                tf,
                tf_idf,
                positions.clone(),
            ));
        }
        documents.insert(entry.id.clone(), entry.doc);
    }

    let dictionary: HashMap<String, PostingList> = postings_by_term
        .into_iter()
        .map(|(term, postings)| (term.clone(), PostingList::new(term, postings)))
        .collect();

    debug!(
        documents = documents.len(),
        vocabulary_size = dictionary.len(),
        avg_doc_length,
        "index built"
    );

    Index {
        documents,
        path_to_id,
        dictionary,
        urls,
        anchor_inbox: corpus.anchor_inbox,
        avg_doc_length,
        crawl_report: corpus.report,
    }
}

/// `TF * IDF`, where `TF = term_frequency / doc_length` and
/// `IDF = ln(N / document_frequency)`. Zero whenever `term_frequency` or
/// `document_frequency` is zero.
fn calculate_tf_idf(term_frequency: usize, doc_length: f64, document_frequency: usize, n: f64) -> f64 {
    if term_frequency == 0 || document_frequency == 0 {
        return 0.0;
    }
    let tf = term_frequency as f64 / doc_length;
    let idf = (n / document_frequency as f64).ln();
    tf * idf
}
