//! Hyperlink extraction from fetched pages
//!
//! Pulls `<a href>` targets out of a page and resolves them to absolute URLs
//! against the page's final address. Off-web schemes and fragment anchors are
//! dropped here; recipe-specific filtering is the driver's job.

use scraper::{Html, Selector};
use url::Url;

/// Extracts all resolvable outgoing hyperlinks from a page.
pub fn extract_links(document: &Html, base_url: &Url) -> Vec<Url> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .collect()
}

/// Resolves an href to an absolute HTTP(S) URL.
///
/// Returns None for links the crawler can never fetch:
/// javascript:/mailto:/tel:/data: schemes, fragment-only anchors, empty
/// hrefs, and anything that fails to resolve.
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/recipes").unwrap()
    }

    fn links_from(html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        extract_links(&document, &base_url())
            .iter()
            .map(|u| u.to_string())
            .collect()
    }

    #[test]
    fn test_absolute_link() {
        let links = links_from(r#"<a href="https://example.com/recipes/x">x</a>"#);
        assert_eq!(links, vec!["https://example.com/recipes/x"]);
    }

    #[test]
    fn test_relative_link_resolved() {
        let links = links_from(r#"<a href="/recipes/chicken-pasta">link</a>"#);
        assert_eq!(links, vec!["https://example.com/recipes/chicken-pasta"]);
    }

    #[test]
    fn test_path_relative_link_resolved() {
        let links = links_from(r#"<a href="beef-stew">link</a>"#);
        assert_eq!(links, vec!["https://example.com/beef-stew"]);
    }

    #[test]
    fn test_special_schemes_skipped() {
        let html = r#"
            <a href="javascript:void(0)">js</a>
            <a href="mailto:hi@example.com">mail</a>
            <a href="tel:+123">tel</a>
            <a href="data:text/html,x">data</a>
        "#;
        assert!(links_from(html).is_empty());
    }

    #[test]
    fn test_fragment_and_empty_skipped() {
        let html = r##"<a href="#section">anchor</a><a href="">empty</a>"##;
        assert!(links_from(html).is_empty());
    }

    #[test]
    fn test_mixed_links() {
        let html = r##"
            <a href="/recipes/one">one</a>
            <a href="javascript:alert('no')">no</a>
            <a href="https://othersite.com/recipes/two">two</a>
        "##;
        let links = links_from(html);
        assert_eq!(links.len(), 2);
    }
}
