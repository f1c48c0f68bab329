use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

/// Schemes that never denote a crawlable or indexable target.
const REJECTED_SCHEMES: &[&str] = &["mailto:", "javascript:", "tel:", "ftp:"];

static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static URL_BEARING_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href], link[href], img[src], script[src], iframe[src]").unwrap());

/// A single outbound hyperlink: its normalized target and the element's
/// trimmed, concatenated visible text (may be empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedLink {
    /// Normalized target, suitable for matching against archive entry paths.
    pub target: String,
    /// Anchor text of the `<a>` element.
    pub anchor_text: String,
}

/// Build a synthetic base [`Url`] for an archive-relative path so that
/// `Url::join` can perform ordinary relative path resolution (`../`,
/// `./`, sibling-relative targets) without the archive path needing to be
/// a real network URL.
pub fn archive_base_url(path: &str) -> Option<Url> {
    Url::parse(&format!("file:///{}", path.trim_start_matches('/'))).ok()
}

/// Extract every `<a href>` link from `html`, resolving relative targets
/// against `base` and dropping targets with a rejected scheme.
pub fn extract_links(html: &str, base: Option<&Url>) -> Vec<ExtractedLink> {
    let document = Html::parse_document(html);
    let mut out = Vec::new();
    for element in document.select(&ANCHOR_SELECTOR) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(target) = normalize_link(href, base) else {
            continue;
        };
        let anchor_text = element.text().collect::<String>().trim().to_string();
        out.push(ExtractedLink {
            target,
            anchor_text,
        });
    }
    out
}

/// Collect every href/src value referenced by `a`, `link`, `img`, `script`
/// and `iframe` elements, deduplicated, without scheme filtering or
/// resolution. This is an informational set, not a crawl frontier.
pub fn extract_all_urls(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for element in document.select(&URL_BEARING_SELECTOR) {
        let value = element
            .value()
            .attr("href")
            .or_else(|| element.value().attr("src"));
        if let Some(value) = value {
            if seen.insert(value.to_string()) {
                out.push(value.to_string());
            }
        }
    }
    out
}

/// Whether a normalized target looks like an HTML document: ends in
/// `.html`, `.htm`, or `/`.
pub fn is_html_shaped(target: &str) -> bool {
    let lower = target.to_ascii_lowercase();
    lower.ends_with(".html") || lower.ends_with(".htm") || lower.ends_with('/')
}

/// Normalize a raw `href` value into a target comparable against archive
/// entry paths: drop the fragment, reject non-crawlable schemes, resolve
/// relative to `base` if given, percent-decode, and strip a leading `/`.
pub fn normalize_link(href: &str, base: Option<&Url>) -> Option<String> {
    let without_fragment = match href.find('#') {
        Some(i) => &href[..i],
        None => href,
    };
    if without_fragment.is_empty() {
        return None;
    }

    let lower = without_fragment.to_ascii_lowercase();
    if REJECTED_SCHEMES.iter().any(|scheme| lower.starts_with(scheme)) {
        return None;
    }

    let resolved = match base {
        Some(base) => match base.join(without_fragment) {
            Ok(url) => {
                // `base` is a synthetic `file:///archive/relative/path` URL
                // (see `archive_base_url`); strip the scheme and authority
                // back off so callers get an archive-relative path again.
                if url.scheme() == "file" {
                    url.path().to_string()
                } else {
                    url.as_str().to_string()
                }
            }
            Err(_) => without_fragment.to_string(),
        },
        None => without_fragment.to_string(),
    };

    let decoded = percent_encoding::percent_decode_str(&resolved)
        .decode_utf8_lossy()
        .into_owned();
    let stripped = decoded.trim_start_matches('/').to_string();
    if stripped.is_empty() {
        None
    } else {
        Some(stripped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_fragment_and_leading_slash() {
        let target = normalize_link("/pages/about.html#section", None).unwrap();
        assert_eq!(target, "pages/about.html");
    }

    #[test]
    fn rejects_non_crawlable_schemes() {
        assert!(normalize_link("mailto:a@b.com", None).is_none());
        assert!(normalize_link("javascript:void(0)", None).is_none());
        assert!(normalize_link("tel:+15555550100", None).is_none());
        assert!(normalize_link("ftp://example.com/f", None).is_none());
    }

    #[test]
    fn resolves_relative_against_base() {
        let base = archive_base_url("dir/page.html").unwrap();
        let target = normalize_link("other.html", Some(&base)).unwrap();
        assert_eq!(target, "dir/other.html");
    }

    #[test]
    fn resolves_parent_relative_against_base() {
        let base = archive_base_url("dir/sub/page.html").unwrap();
        let target = normalize_link("../other.html", Some(&base)).unwrap();
        assert_eq!(target, "dir/other.html");
    }

    #[test]
    fn extracts_anchor_text_pairs() {
        let html = r#"<a href="a.html">First</a> <a href="b.html"></a>"#;
        let links = extract_links(html, None);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].target, "a.html");
        assert_eq!(links[0].anchor_text, "First");
        assert_eq!(links[1].anchor_text, "");
    }

    #[test]
    fn html_shaped_targets() {
        assert!(is_html_shaped("index.html"));
        assert!(is_html_shaped("dir/"));
        assert!(!is_html_shaped("style.css"));
    }
}
