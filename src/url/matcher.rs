/// Checks if a site-relative href starts with any excluded path prefix
///
/// Matching is a plain string prefix test on the raw href, so `/resource`
/// also excludes `/resourcespages/...`. That mirrors how the skip list is
/// written for the target site.
///
/// # Examples
///
/// ```
/// use vetharvest::url::is_excluded_path;
///
/// let skip = vec!["/authors".to_string()];
/// assert!(is_excluded_path("/authors/jane-doe", &skip));
/// assert!(!is_excluded_path("/dog-owners", &skip));
/// ```
pub fn is_excluded_path(href: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|prefix| href.starts_with(prefix.as_str()))
}

/// Owned list of excluded path prefixes
#[derive(Debug, Clone, Default)]
pub struct ExcludedPaths {
    prefixes: Vec<String>,
}

impl ExcludedPaths {
    pub fn new(prefixes: Vec<String>) -> Self {
        Self { prefixes }
    }

    /// Returns true if the href is excluded
    pub fn excludes(&self, href: &str) -> bool {
        is_excluded_path(href, &self.prefixes)
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skip_list() -> Vec<String> {
        vec![
            "/resource".to_string(),
            "/authors".to_string(),
            "/pages-with-widgets/quizzes".to_string(),
        ]
    }

    #[test]
    fn test_exact_prefix() {
        assert!(is_excluded_path("/authors", &skip_list()));
        assert!(is_excluded_path("/authors/x", &skip_list()));
    }

    #[test]
    fn test_prefix_is_raw_string_match() {
        assert!(is_excluded_path("/resourcespages/glossary", &skip_list()));
    }

    #[test]
    fn test_not_excluded() {
        assert!(!is_excluded_path("/dog-owners", &skip_list()));
        assert!(!is_excluded_path("/pages-with-widgets/other", &skip_list()));
    }

    #[test]
    fn test_empty_list_excludes_nothing() {
        assert!(!is_excluded_path("/authors", &[]));
    }

    #[test]
    fn test_excluded_paths_wrapper() {
        let paths = ExcludedPaths::new(skip_list());
        assert!(paths.excludes("/pages-with-widgets/quizzes/1"));
        assert_eq!(paths.prefixes().len(), 3);
    }
}
