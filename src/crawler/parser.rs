//! HTML link extraction and resolution
//!
//! This module handles:
//! - Pulling raw link targets out of HTML (every `href` and `src` attribute)
//! - Resolving them against the page's effective URL
//! - Filtering the resolved URLs through the crawl scope

use crate::url::ScopeFilter;
use scraper::{Html, Selector};
use url::Url;

/// Produces raw link targets from an HTML body
pub trait LinkExtractor: Send + Sync {
    /// Returns link targets in document order, relative or absolute, unresolved
    fn extract_links(&self, body: &str) -> Vec<String>;
}

/// Link extractor built on `scraper`
///
/// Collects the value of every `href` and `src` attribute in document order,
/// so anchors, stylesheets, scripts, images and frames are all candidates.
/// An element carrying both attributes yields `href` first.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlLinkExtractor;

impl HtmlLinkExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl LinkExtractor for HtmlLinkExtractor {
    fn extract_links(&self, body: &str) -> Vec<String> {
        let document = Html::parse_document(body);
        let mut links = Vec::new();

        let Ok(selector) = Selector::parse("[href], [src]") else {
            return links;
        };

        for element in document.select(&selector) {
            for attr in ["href", "src"] {
                if let Some(value) = element.value().attr(attr) {
                    let value = value.trim();
                    if !value.is_empty() {
                        links.push(value.to_string());
                    }
                }
            }
        }

        links
    }
}

/// Resolves the links of a page into in-scope absolute URLs
///
/// Relative targets are joined against `page_url` (the page's effective URL,
/// after redirects); absolute targets pass through. Targets that cannot be
/// joined are dropped. Duplicates are kept and document order is preserved.
///
/// # Arguments
///
/// * `body` - The HTML content
/// * `page_url` - The effective URL of the page the body came from
/// * `scope` - The crawl scope
/// * `extractor` - Source of raw link targets
///
/// # Example
///
/// ```
/// use asset_crawler::crawler::{resolve_links, HtmlLinkExtractor};
/// use asset_crawler::url::ScopeFilter;
///
/// let scope = ScopeFilter::new("http://site.test/").unwrap();
/// let html = r#"<a href="/a">A</a><img src="img.png"><a href="http://other.test/">X</a>"#;
/// let links = resolve_links(html, "http://site.test/", &scope, &HtmlLinkExtractor);
/// assert_eq!(links, vec!["http://site.test/a", "http://site.test/img.png"]);
/// ```
pub fn resolve_links<E>(body: &str, page_url: &str, scope: &ScopeFilter, extractor: &E) -> Vec<String>
where
    E: LinkExtractor + ?Sized,
{
    let page = match Url::parse(page_url) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!("Cannot resolve links against {}: {}", page_url, e);
            return Vec::new();
        }
    };

    extractor
        .extract_links(body)
        .iter()
        .filter_map(|raw| match page.join(raw) {
            Ok(absolute) => Some(absolute.to_string()),
            Err(e) => {
                tracing::debug!("Dropping link {:?} on {}: {}", raw, page_url, e);
                None
            }
        })
        .filter(|candidate| {
            let keep = scope.is_in_scope(candidate);
            if !keep {
                tracing::trace!("Out of scope: {}", candidate);
            }
            keep
        })
        .collect()
}
