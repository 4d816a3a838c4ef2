//! Crawl scope decisions
//!
//! A crawl is anchored at its start URL. Candidates are compared against the
//! start URL's authority and path.

use crate::url::split::split_url;
use crate::ConfigError;
use url::Url;

/// Decides whether candidate URLs belong to a crawl anchored at a base URL
///
/// A candidate is in scope when it has exactly the same authority as the base
/// (no subdomain matching) and a path different from the base path. The scheme
/// is ignored. The base URL is fixed at construction and never changes.
///
/// Candidates reach the filter already serialized by `url::Url`, so the base is
/// compared in the same serialized form when it parses: host case and default
/// ports in the start URL do not push its own links out of scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeFilter {
    base_url: String,
    anchor: String,
}

impl ScopeFilter {
    /// Creates a scope filter anchored at `base_url`
    ///
    /// # Returns
    ///
    /// * `Ok(ScopeFilter)` - Ready to answer scope questions
    /// * `Err(ConfigError::MissingBaseUrl)` - `base_url` is empty
    ///
    /// # Examples
    ///
    /// ```
    /// use asset_crawler::url::ScopeFilter;
    ///
    /// let scope = ScopeFilter::new("https://example.com/").unwrap();
    /// assert!(scope.is_in_scope("https://example.com/about"));
    /// assert!(scope.is_in_scope("http://example.com/about"));
    /// assert!(!scope.is_in_scope("https://example.com/"));
    /// assert!(!scope.is_in_scope("https://blog.example.com/about"));
    /// ```
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = base_url.into();
        if base_url.is_empty() {
            return Err(ConfigError::MissingBaseUrl { url: base_url });
        }
        let anchor = match Url::parse(&base_url) {
            Ok(parsed) => parsed.to_string(),
            Err(_) => base_url.clone(),
        };
        Ok(Self { base_url, anchor })
    }

    /// The start URL as given
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns true if `candidate` shares the base authority and not the base path
    pub fn is_in_scope(&self, candidate: &str) -> bool {
        let base = split_url(&self.anchor);
        let current = split_url(candidate);
        current.authority == base.authority && current.path != base.path
    }
}

/// Checks a candidate against a base URL that may not have been established
///
/// This is the checked form of [`ScopeFilter::is_in_scope`] for callers that
/// hold the base URL as plain data.
///
/// # Returns
///
/// * `Ok(bool)` - Whether `candidate` is in scope
/// * `Err(ConfigError::MissingBaseUrl)` - `base_url` is empty; the error names `candidate`
pub fn check_scope(candidate: &str, base_url: &str) -> Result<bool, ConfigError> {
    if base_url.is_empty() {
        return Err(ConfigError::MissingBaseUrl {
            url: candidate.to_string(),
        });
    }
    Ok(ScopeFilter::new(base_url)?.is_in_scope(candidate))
}
