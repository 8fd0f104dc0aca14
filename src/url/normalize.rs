use crate::{UrlError, UrlResult};
use url::Url;

/// Normalizes a URL according to Vetharvest's normalization rules
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Require an HTTP or HTTPS scheme
/// 3. Require a host (the parser lowercases it)
/// 4. Remove fragment (everything after #)
///
/// Paths and query strings are kept as the site serves them; the parser
/// already removes `.` and `..` segments.
///
/// # Examples
///
/// ```
/// use vetharvest::url::normalize_url;
///
/// let url = normalize_url("https://WWW.EXAMPLE.COM/a/b#frag").unwrap();
/// assert_eq!(url.as_str(), "https://www.example.com/a/b");
/// ```
pub fn normalize_url(url_str: &str) -> UrlResult<Url> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;
    finish(url)
}

/// Resolves an href against a base URL and normalizes the result
///
/// # Arguments
///
/// * `base` - The URL relative links are resolved against
/// * `href` - The raw `href` attribute value
///
/// # Returns
///
/// * `Ok(Url)` - Absolute URL with no fragment
/// * `Err(UrlError)` - The href could not be resolved
pub fn resolve_link(base: &Url, href: &str) -> UrlResult<Url> {
    let url = base
        .join(href.trim())
        .map_err(|e| UrlError::Parse(format!("{}: {}", href, e)))?;
    finish(url)
}

fn finish(mut url: Url) -> UrlResult<Url> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);
    Ok(url)
}
