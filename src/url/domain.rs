use url::Url;

/// Strips a single leading `www.` prefix from a host name.
///
/// Used to treat `www.example.com` and `example.com` as the same site when
/// checking link internality.
pub fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

/// Extracts the lowercase host from a URL, or `None` if it has no host.
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}
