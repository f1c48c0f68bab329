//! HTML text extraction, tokenization, and link normalization.
//!
//! This crate is pure and stateless: every function is a plain
//! `(html, ...) -> data` transform with no I/O, so it is trivially safe to
//! call from a worker pool (see `webcorpus-spider`).

mod links;
mod stopwords;
mod tokenize;

pub use links::{archive_base_url, extract_all_urls, extract_links, is_html_shaped, ExtractedLink};
pub use tokenize::{extract_visible_text, tokenize_document, tokenize_text};
