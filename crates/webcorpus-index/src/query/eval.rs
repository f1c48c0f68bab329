use std::collections::{HashMap, HashSet};

use webcorpus_types::DocId;

use crate::index::Index;

/// A single scored match.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    /// The matching document.
    pub doc_id: DocId,
    /// The plan-specific relevance score (higher is better).
    pub score: f64,
}

/// The outcome of evaluating a query plan: the (possibly truncated)
/// ranked hits, and the true number of matches before truncation.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    /// Top results, truncated to at most 100 entries.
    pub hits: Vec<SearchHit>,
    /// The full match count, recorded before any truncation.
    pub total_count: usize,
}

const TOP_K: usize = 100;

/// Sort `candidates` by score descending (ties preserve insertion order,
/// since `sort_by` is stable) and truncate to the top 100, recording the
/// true count first.
pub(crate) fn finalize(candidates: Vec<SearchHit>) -> SearchOutcome {
    let total_count = candidates.len();
    let mut hits = candidates;
    hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    hits.truncate(TOP_K);
    SearchOutcome { hits, total_count }
}

/// Boolean OR: union of documents containing any query term, scored by
/// the best (maximum) TF-IDF among the terms present in that document.
pub fn or_search(index: &Index, terms: &[String]) -> SearchOutcome {
    let mut scores: HashMap<DocId, f64> = HashMap::new();
    for term in terms {
        let Some(list) = index.postings_for(term) else {
            continue;
        };
        for posting in &list.postings {
            let entry = scores.entry(posting.doc_id.clone()).or_insert(0.0);
            if posting.tf_idf > *entry {
                *entry = posting.tf_idf;
            }
        }
    }
    finalize(
        scores
            .into_iter()
            .map(|(doc_id, score)| SearchHit { doc_id, score })
            .collect(),
    )
}

/// Boolean AND: intersection of documents containing every query term,
/// scored by the sum of each term's TF-IDF in that document. Any missing
/// term yields an empty result.
pub fn and_search(index: &Index, terms: &[String]) -> SearchOutcome {
    if terms.is_empty() {
        return SearchOutcome::default();
    }

    let mut doc_sets: Vec<HashSet<DocId>> = Vec::with_capacity(terms.len());
    for term in terms {
        let Some(list) = index.postings_for(term) else {
            return SearchOutcome::default();
        };
        doc_sets.push(list.postings.iter().map(|p| p.doc_id.clone()).collect());
    }

    let mut intersection = doc_sets[0].clone();
    for set in &doc_sets[1..] {
        intersection.retain(|doc_id| set.contains(doc_id));
    }
    if intersection.is_empty() {
        return SearchOutcome::default();
    }

    let mut scores: HashMap<DocId, f64> = intersection.iter().cloned().map(|d| (d, 0.0)).collect();
    for term in terms {
        let Some(list) = index.postings_for(term) else {
            continue;
        };
        for posting in &list.postings {
            if let Some(score) = scores.get_mut(&posting.doc_id) {
                *score += posting.tf_idf;
            }
        }
    }

    finalize(
        scores
            .into_iter()
            .map(|(doc_id, score)| SearchHit { doc_id, score })
            .collect(),
    )
}

/// Boolean difference ("but"): documents containing `include` minus those
/// containing `exclude`, scored by `include`'s TF-IDF in each surviving
/// document.
pub fn difference_search(index: &Index, include: &str, exclude: &str) -> SearchOutcome {
    let Some(include_list) = index.postings_for(include) else {
        return SearchOutcome::default();
    };
    let exclude_docs: HashSet<DocId> = index
        .postings_for(exclude)
        .map(|list| list.postings.iter().map(|p| p.doc_id.clone()).collect())
        .unwrap_or_default();

    let hits = include_list
        .postings
        .iter()
        .filter(|p| !exclude_docs.contains(&p.doc_id))
        .map(|p| SearchHit {
            doc_id: p.doc_id.clone(),
            score: p.tf_idf,
        })
        .collect();

    finalize(hits)
}

/// Vector-space cosine similarity. The document-vector norm is computed
/// only over the query terms present in that document, not the full
/// document vector. This under-penalizes long documents relative to a
/// textbook cosine similarity, but it is the intentional, documented
/// behavior of this ranking function.
pub fn vector_space_search(index: &Index, terms: &[String]) -> SearchOutcome {
    if terms.is_empty() {
        return SearchOutcome::default();
    }

    let mut query_freq: HashMap<String, f64> = HashMap::new();
    for term in terms {
        *query_freq.entry(term.clone()).or_insert(0.0) += 1.0;
    }
    let query_length = query_freq.values().map(|f| f * f).sum::<f64>().sqrt();
    if query_length == 0.0 {
        return SearchOutcome::default();
    }

    let mut candidates: HashSet<DocId> = HashSet::new();
    let mut term_doc_tfidf: HashMap<String, HashMap<DocId, f64>> = HashMap::new();
    for term in query_freq.keys() {
        if let Some(list) = index.postings_for(term) {
            let mut by_doc = HashMap::new();
            for posting in &list.postings {
                candidates.insert(posting.doc_id.clone());
                by_doc.insert(posting.doc_id.clone(), posting.tf_idf);
            }
            term_doc_tfidf.insert(term.clone(), by_doc);
        }
    }

    let mut hits = Vec::new();
    for doc_id in candidates {
        let mut dot_product = 0.0;
        let mut doc_length_sq = 0.0;
        for (term, freq) in &query_freq {
            if let Some(tfidf) = term_doc_tfidf.get(term).and_then(|by_doc| by_doc.get(&doc_id)) {
                dot_product += freq * tfidf;
                doc_length_sq += tfidf * tfidf;
            }
        }
        if doc_length_sq <= 0.0 {
            continue;
        }
        let score = dot_product / (query_length * doc_length_sq.sqrt());
        if score > 0.0 {
            hits.push(SearchHit { doc_id, score });
        }
    }

    finalize(hits)
}

/// Exact phrase search: documents where the phrase's tokens appear at
/// consecutive positions in that order. Score is the mean TF-IDF of the
/// phrase's tokens in that document.
pub fn phrase_search(index: &Index, terms: &[String]) -> SearchOutcome {
    if terms.is_empty() {
        return SearchOutcome::default();
    }

    let mut posting_lists = Vec::with_capacity(terms.len());
    for term in terms {
        let Some(list) = index.postings_for(term) else {
            return SearchOutcome::default();
        };
        posting_lists.push(list);
    }

    let mut doc_sets: Vec<HashSet<DocId>> = posting_lists
        .iter()
        .map(|list| list.postings.iter().map(|p| p.doc_id.clone()).collect())
        .collect();
    let mut intersection = doc_sets.remove(0);
    for set in &doc_sets {
        intersection.retain(|doc_id| set.contains(doc_id));
    }
    if intersection.is_empty() {
        return SearchOutcome::default();
    }

    let mut hits = Vec::new();
    for doc_id in &intersection {
        let positions: Vec<&[usize]> = posting_lists
            .iter()
            .map(|list| {
                list.postings
                    .iter()
                    .find(|p| &p.doc_id == doc_id)
                    .map(|p| p.positions.as_slice())
                    .unwrap_or(&[])
            })
            .collect();

        let first_positions = positions[0];
        let matches = first_positions.iter().any(|&start| {
            positions[1..]
                .iter()
                .enumerate()
                .all(|(offset, later)| later.contains(&(start + offset + 1)))
        });
        if !matches {
            continue;
        }

        let sum: f64 = posting_lists
            .iter()
            .filter_map(|list| list.postings.iter().find(|p| &p.doc_id == doc_id))
            .map(|p| p.tf_idf)
            .sum();
        hits.push(SearchHit {
            doc_id: doc_id.clone(),
            score: sum / terms.len() as f64,
        });
    }

    finalize(hits)
}

/// The legacy `!term` shortcut: every document containing `term`,
/// unscored, in document-id order.
pub fn legacy_search(index: &Index, term: &str) -> Vec<DocId> {
    let mut ids: Vec<DocId> = index
        .postings_for(term)
        .map(|list| list.postings.iter().map(|p| p.doc_id.clone()).collect())
        .unwrap_or_default();
    ids.sort();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_index;
    use webcorpus_spider::CrawledCorpus;
    use std::collections::HashMap as Map;

    fn corpus_of(docs: &[(&str, &str)]) -> CrawledCorpus {
        let mut documents = Map::new();
        for (path, html) in docs {
            documents.insert((*path).to_string(), (*html).to_string());
        }
        CrawledCorpus {
            documents,
            anchor_inbox: Map::new(),
            report: Default::default(),
        }
    }

    #[test]
    fn or_and_and_and_difference_match_spec_scenario() {
        let index = build_index(corpus_of(&[
            ("a.html", "<p>cat dog</p>"),
            ("b.html", "<p>dog bird</p>"),
        ]));

        let cat_only = or_search(&index, &["cat".into()]);
        assert_eq!(cat_only.hits.len(), 1);

        let or_result = or_search(&index, &["cat".into(), "bird".into()]);
        assert_eq!(or_result.total_count, 2);

        let and_result = and_search(&index, &["cat".into(), "dog".into()]);
        assert_eq!(and_result.hits.len(), 1);
        assert_eq!(
            index.document_path(&and_result.hits[0].doc_id),
            Some("a.html")
        );

        let diff = difference_search(&index, "dog", "cat");
        assert_eq!(diff.hits.len(), 1);
        assert_eq!(index.document_path(&diff.hits[0].doc_id), Some("b.html"));
    }

    #[test]
    fn phrase_requires_consecutive_positions() {
        let index = build_index(corpus_of(&[("a.html", "<p>the quick brown fox</p>")]));
        let found = phrase_search(&index, &["quick".into(), "brown".into()]);
        assert_eq!(found.hits.len(), 1);

        let not_found = phrase_search(&index, &["brown".into(), "quick".into()]);
        assert!(not_found.hits.is_empty());
    }

    #[test]
    fn top_k_caps_at_100_but_reports_true_total() {
        let docs: Vec<(String, String)> = (0..150)
            .map(|i| (format!("doc{i}.html"), "<p>foo</p>".to_string()))
            .collect();
        let refs: Vec<(&str, &str)> = docs.iter().map(|(p, h)| (p.as_str(), h.as_str())).collect();
        let index = build_index(corpus_of(&refs));

        let outcome = or_search(&index, &["foo".into()]);
        assert_eq!(outcome.hits.len(), 100);
        assert_eq!(outcome.total_count, 150);
    }

    #[test]
    fn unknown_term_is_empty_not_an_error() {
        let index = build_index(corpus_of(&[("a.html", "<p>cat</p>")]));
        let outcome = vector_space_search(&index, &["zzxxqq".into()]);
        assert!(outcome.hits.is_empty());
        assert_eq!(outcome.total_count, 0);
    }

    #[test]
    fn bang_prefix_short_circuits_to_legacy_unscored_search() {
        let index = build_index(corpus_of(&[
            ("a.html", "<p>cat dog</p>"),
            ("b.html", "<p>dog bird</p>"),
        ]));

        let outcome = crate::query::process_query(&index, "!dog");
        assert_eq!(outcome.total_count, 2);
        assert!(outcome.hits.iter().all(|hit| hit.score == 0.0));
    }
}
