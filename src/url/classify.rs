//! Recipe URL classification predicates
//!
//! Three independent, pure predicates decide what the crawler does with a
//! discovered URL: extract it as a recipe page, follow it for further
//! discovery, or drop it as off-domain. All of them degrade to `false` on
//! malformed input rather than returning an error.

use crate::url::domain::{extract_host, strip_www};
use url::Url;

/// Path segments that disqualify a URL from being a recipe detail page,
/// matched as substrings against the lowercased path.
const SKIP_SEGMENTS: &[&str] = &[
    "/recipes/category/",
    "/recipes/collection/",
    "/recipes/tag/",
    "/recipe/category/",
    "/recipe/collection/",
    "/recipe/tag/",
    "/category/",
    "/categories/",
    "/collection/",
    "/collections/",
    "/tag/",
    "/tags/",
    "/author/",
    "/authors/",
    "/search",
    "/about",
    "/contact",
    "/privacy",
    "/terms",
    "/sitemap",
    "/rss",
    "/feed",
    "/wp-admin",
    "/wp-content",
    "/wp-includes",
    "/admin",
    "/login",
    "/register",
    "/cart",
    "/checkout",
    "/account",
    "/blog/",
    "/news/",
    "/article/",
    "/video/",
    "/podcast/",
    "/webinar/",
    "/event/",
    "/competition/",
    "/contest/",
    "/gallery/",
    "/photo/",
    "/image/",
    "/quiz/",
    "/poll/",
    "/survey/",
    "/faq/",
    "/help/",
    "/support/",
    "/api/",
    "/json/",
    "/xml/",
    "/robots.txt",
    "/favicon.ico",
    "/apple-touch-icon",
    "/manifest.json",
    "/service-worker.js",
];

/// Recipe-topic markers that make a URL worth following for discovery,
/// matched as substrings against the lowercased URL.
const RELATED_MARKERS: &[&str] = &[
    "/recipes/",
    "/recipe/",
    "/healthy-recipes/",
    "/quick-recipes/",
    "/easy-recipes/",
    "/vegetarian-recipes/",
    "/vegan-recipes/",
    "/gluten-free-recipes/",
];

/// Returns true if the URL points at a recipe detail page.
///
/// A detail page has exactly one slug segment under the `/recipes` (or
/// `/recipe`) prefix: `/recipes/<slug>` with no further sub-path. The bare
/// listing path (`/recipes`, with or without a trailing slash) and any path
/// containing a known non-recipe segment are rejected. The slug match is
/// case-sensitive; the skip-segment scan is not.
///
/// # Examples
///
/// ```
/// use ladle::url::is_valid_recipe_url;
///
/// assert!(is_valid_recipe_url("https://example.com/recipes/chicken-pasta"));
/// assert!(!is_valid_recipe_url("https://example.com/recipes/"));
/// assert!(!is_valid_recipe_url("https://example.com/recipes/category/mains"));
/// ```
pub fn is_valid_recipe_url(url: &str) -> bool {
    let parsed = match Url::parse(url) {
        Ok(u) => u,
        Err(_) => return false,
    };
    let path = parsed.path();

    // The listing/index page itself is never a detail page
    let trimmed = path.trim_end_matches('/');
    if trimmed == "/recipes" || trimmed == "/recipe" {
        return false;
    }

    let path_lower = path.to_lowercase();
    if SKIP_SEGMENTS.iter().any(|seg| path_lower.contains(seg)) {
        return false;
    }

    matches_detail_shape(path)
}

/// Checks the exact `/recipes/<slug>` single-segment shape.
fn matches_detail_shape(path: &str) -> bool {
    let slug = match path
        .strip_prefix("/recipes/")
        .or_else(|| path.strip_prefix("/recipe/"))
    {
        Some(rest) => rest,
        None => return false,
    };

    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Returns true if the URL is worth following because it may link to recipe
/// detail pages (e.g. a themed listing page).
///
/// This is a discovery heuristic, deliberately looser than
/// [`is_valid_recipe_url`]: any URL containing a recipe-topic marker
/// qualifies, case-insensitively.
pub fn is_recipe_related_url(url: &str) -> bool {
    let url_lower = url.to_lowercase();
    RELATED_MARKERS.iter().any(|m| url_lower.contains(m))
}

/// Returns true if the URL's host belongs to the allowed domain.
///
/// Hosts are compared lowercased, after stripping a single leading `www.`
/// from both sides, so `www.example.com` and `example.com` are equivalent.
/// Scheme and path are irrelevant. Malformed URLs are external.
pub fn is_internal_link(url: &str, allowed_domain: &str) -> bool {
    let parsed = match Url::parse(url) {
        Ok(u) => u,
        Err(_) => return false,
    };

    let allowed = allowed_domain.to_lowercase();
    match extract_host(&parsed) {
        Some(host) => strip_www(&host) == strip_www(&allowed),
        None => false,
    }
}
