//! Link extraction from hub pages
//!
//! Only site-relative anchors inside the main container are followed.

use crate::config::SelectorConfig;
use crate::page::PageDriver;
use crate::url::{resolve_link, same_site, ExcludedPaths};
use crate::Result;
use std::collections::HashSet;
use url::Url;

/// Collects in-scope links from the page currently loaded in `page`
///
/// # Link Rules
///
/// **Dropped:**
/// - anchors without an `href`
/// - hrefs not starting with `/` (absolute and external links)
/// - hrefs starting with an excluded prefix
/// - protocol-relative hrefs (`//host/...`) that leave the site
///
/// Kept links are resolved against `base`, stripped of fragments and
/// deduplicated; the first occurrence keeps its position.
pub fn extract_links<P: PageDriver>(
    page: &P,
    base: &Url,
    selectors: &SelectorConfig,
    excluded: &ExcludedPaths,
) -> Result<Vec<String>> {
    let anchors = page.query_selector_all(&selectors.link_anchors)?;
    let hrefs = anchors.iter().map(|anchor| anchor.attr("href"));
    Ok(filter_links(hrefs, base, excluded))
}

/// Applies the link rules to raw `href` values in document order
pub fn filter_links<'a>(
    hrefs: impl IntoIterator<Item = Option<&'a str>>,
    base: &Url,
    excluded: &ExcludedPaths,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for href in hrefs {
        let href = match href {
            Some(href) if href.starts_with('/') && !excluded.excludes(href) => href,
            other => {
                tracing::debug!("Skipping link: {:?}", other);
                continue;
            }
        };

        let url = match resolve_link(base, href) {
            Ok(url) if same_site(&url, base) => url,
            Ok(url) => {
                tracing::debug!("Skipping off-site link: {}", url);
                continue;
            }
            Err(e) => {
                tracing::debug!("Skipping unresolvable link {}: {}", href, e);
                continue;
            }
        };

        let url = String::from(url);
        if seen.insert(url.clone()) {
            links.push(url);
        }
    }

    links
}
