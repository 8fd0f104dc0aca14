//! URL handling module for Vetharvest
//!
//! This module provides URL normalization, same-site checks, and
//! excluded-path prefix matching.

mod domain;
mod matcher;
mod normalize;

pub use domain::{extract_host, same_site};
pub use matcher::{is_excluded_path, ExcludedPaths};
pub use normalize::{normalize_url, resolve_link};

use crate::{UrlError, UrlResult};
use url::Url;

/// Normalizes a URL and requires it to live on the given site
///
/// # Arguments
///
/// * `url_str` - The URL string to check
/// * `site` - The site base URL
///
/// # Returns
///
/// * `Ok(Url)` - The normalized, same-site URL
/// * `Err(UrlError)` - The URL is malformed or points elsewhere
pub fn normalize_on_site(url_str: &str, site: &Url) -> UrlResult<Url> {
    let url = normalize_url(url_str)?;
    if !same_site(&url, site) {
        return Err(UrlError::OffSite {
            url: url.to_string(),
            site: site.to_string(),
        });
    }
    Ok(url)
}
