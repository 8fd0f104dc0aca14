use url::Url;

/// Extracts the lowercase host from a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use vetharvest::url::extract_host;
///
/// let url = Url::parse("https://www.merckvetmanual.com/dog-owners").unwrap();
/// assert_eq!(extract_host(&url), Some("www.merckvetmanual.com".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true if both URLs share scheme, host and port
pub fn same_site(url: &Url, site: &Url) -> bool {
    url.scheme() == site.scheme()
        && extract_host(url) == extract_host(site)
        && url.port_or_known_default() == site.port_or_known_default()
}
